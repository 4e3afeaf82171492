mod operation_info_tests;
mod query_document_tests;
