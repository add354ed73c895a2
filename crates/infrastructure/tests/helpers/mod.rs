#![allow(dead_code)]

mod mock_http_server;

pub use mock_http_server::MockHttpServer;
