mod auto_clear_tests;
