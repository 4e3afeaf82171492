mod path_ops_tests;
