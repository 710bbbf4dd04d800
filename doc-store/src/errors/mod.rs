pub mod doc_store_error;
