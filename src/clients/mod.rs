mod macros;
mod user_list_client;

pub use user_list_client::UserListClient;
