pub mod fixture_server;
