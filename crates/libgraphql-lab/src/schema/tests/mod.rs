mod introspection_tests;
