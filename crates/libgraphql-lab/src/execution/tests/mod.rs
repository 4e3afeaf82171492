mod subscription_pump_tests;
