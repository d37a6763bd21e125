//! Tables shared by the relation tests.
//!
//! Ids are text so generated UUIDs and caller-supplied ids can mix.

use tether::{Declaration, ModelDef};

pub const TEAMS: &str = "
CREATE TABLE teams (
    id TEXT PRIMARY KEY,
    name TEXT,
    createdAt TIMESTAMP,
    updatedAt TIMESTAMP
);
";

pub const USERS: &str = "
CREATE TABLE users (
    id TEXT PRIMARY KEY,
    name TEXT,
    email VARCHAR(255),
    age INTEGER,
    admin BOOLEAN,
    tags JSON,
    teamId TEXT,
    saveCount INTEGER,
    createdAt TIMESTAMP,
    updatedAt TIMESTAMP
);
";

pub const PROFILES: &str = "
CREATE TABLE profiles (
    id TEXT PRIMARY KEY,
    userId TEXT,
    bio TEXT,
    createdAt TIMESTAMP,
    updatedAt TIMESTAMP
);
";

pub const PROJECTS: &str = "
CREATE TABLE projects (
    id TEXT PRIMARY KEY,
    name TEXT,
    createdAt TIMESTAMP,
    updatedAt TIMESTAMP
);

CREATE TABLE projects_users (
    id TEXT PRIMARY KEY,
    projectId TEXT NOT NULL,
    userId TEXT NOT NULL,
    createdAt TIMESTAMP,
    updatedAt TIMESTAMP
);
";

/// Every fixture table.
pub fn schema() -> String {
    [TEAMS, USERS, PROFILES, PROJECTS].concat()
}

pub fn teams() -> ModelDef {
    ModelDef::new("teams").has_many("users")
}

/// Users belong to a team, have one profile and many projects through
/// `projects_users`.
pub fn users() -> ModelDef {
    ModelDef::new("users")
        .belongs_to("team")
        .has_one("profile")
        .has_and_belongs_to_many("projects")
}

pub fn projects() -> ModelDef {
    ModelDef::new("projects").relation("users", Declaration::has_and_belongs_to_many("users"))
}

pub fn profiles() -> ModelDef {
    ModelDef::new("profiles").belongs_to("user")
}
