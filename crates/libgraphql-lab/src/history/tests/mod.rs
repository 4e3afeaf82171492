mod history_record_tests;
mod history_store_tests;
