mod argument_ops_tests;
