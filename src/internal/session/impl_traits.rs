pub mod directory_sink;
pub mod reqwest_transport;

pub use directory_sink::DirectorySink;
pub use reqwest_transport::ReqwestTransport;
