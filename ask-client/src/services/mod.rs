pub mod http_ask_service;
