pub mod client;
pub mod http;
pub mod types;

pub use client::{RpcClient, RpcError};
pub use http::HttpRpcClient;
pub use types::{CreateMessageInput, ErrorCode, Message, MessageRole, UsageSnapshot};
