//! The relation engine: eager loading, cascading saves and dependent
//! destroys. Everything here talks to the database through [`Exec`].

pub(crate) mod destroy;
pub(crate) mod eager;
mod exec;
mod graft;
pub(crate) mod persist;

pub(crate) use exec::Exec;
