/// Application name
pub const APP_NAME: &str = "OrgDesk";

/// Storage key holding the serialized dataset snapshot
pub const SNAPSHOT_KEY: &str = "orgdesk.snapshot.v1";

/// Storage key holding the credential token (authenticated account email)
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Storage key holding an email that registered but has not verified yet
pub const UNVERIFIED_EMAIL_KEY: &str = "unverified_email";

/// Minimum accepted password length (characters)
pub const MIN_PASSWORD_LEN: usize = 6;

/// Seed admin account, installed on first run or after a corrupt snapshot
pub const SEED_ADMIN_ID: &str = "admin1";
pub const SEED_ADMIN_EMAIL: &str = "admin@example.com";
pub const SEED_ADMIN_PASSWORD: &str = "Password123!";

/// Seed departments as (id, name, description)
pub const SEED_DEPARTMENTS: [(&str, &str, &str); 2] = [
    ("dept1", "Engineering", "Software team"),
    ("dept2", "HR", "Human Resources"),
];

/// Placeholder shown for a missing department or hire date
pub const EMPTY_CELL: &str = "—";
