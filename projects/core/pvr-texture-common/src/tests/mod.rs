mod capability_tests;
