//! # roster
//!
//! A session-scoped user list over the reqres.in demo API: load a page of
//! users, create new ones, rename and delete them locally, and filter the
//! result by name.
//!
//! ## Pieces
//!
//! - **Domain types** - plain records and payloads → [`domain::UserRecord`], [`domain::NewUser`]
//! - **Store** - the reconciliation rules, synchronous and side-effect free → [`store::UserListStore`]
//! - **Actor** - owns one store and serialises every change through its mailbox → [`store::UserListActor`]
//! - **Client** - cloneable handle with macro-generated request methods → [`clients::UserListClient`]
//! - **Remote** - the HTTP side behind a trait → [`remote::RemoteUserService`], [`remote::ReqresClient`]
//! - **System** - startup, wiring and shutdown → [`app_system::RosterSystem`]
//! - **View** - terminal rendering and the line-based session → [`view::run_session`]
//!
//! ## Remote calls
//!
//! `load` and `create` are two-phase. The store issues a ticket, the actor runs
//! the HTTP call in a spawned task, and the outcome comes back through the
//! mailbox. Only the latest ticket of each kind is applied; older ones settle as
//! [`store::Settlement::Superseded`].
//!
//! ## Example Usage
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use roster::app_system::RosterSystem;
//! use roster::config::Settings;
//!
//! let system = RosterSystem::new(&Settings::default())?;
//! system.client.load().await?;
//! system.client.set_search("jan".to_string()).await?;
//! let snapshot = system.client.snapshot().await?;
//! println!("{}", roster::view::render(&snapshot));
//! system.shutdown().await.map_err(anyhow::Error::msg)?;
//! # Ok(())
//! # }
//! ```

pub mod app_system;
pub mod cli;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod messages;
pub mod remote;
pub mod store;
pub mod view;

#[cfg(test)]
mod mock_framework;
