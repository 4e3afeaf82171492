mod operation_store_tests;
