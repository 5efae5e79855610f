use rand::Rng;
use rand::distr::{Alphanumeric, SampleString};

/// One account to insert, before it becomes an `ActiveModel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub role: String,
}

/// The well-known accounts every fresh database starts with. These are the
/// credentials the walkthroughs reference, so the list is fixed verbatim.
const FIXED_ACCOUNTS: [(&str, &str, &str, &str); 10] = [
    ("admin", "secretpassword", "admin@example.com", "admin"),
    ("john_doe", "password123", "john@example.com", "user"),
    ("jane_smith", "securepass", "jane@example.com", "user"),
    ("bob_johnson", "bobpass", "bob@example.com", "user"),
    ("alice_wonder", "alicepass", "alice@example.com", "user"),
    ("charlie_brown", "snoopy", "charlie@example.com", "user"),
    ("emma_watson", "hermione", "emma@example.com", "user"),
    ("david_beckham", "football", "david@example.com", "user"),
    ("sarah_connor", "terminator", "sarah@example.com", "user"),
    ("tony_stark", "ironman", "tony@example.com", "user"),
];

const GENERATED_ROLES: [&str; 2] = ["user", "moderator"];

#[must_use]
pub fn fixed_users() -> Vec<SeedUser> {
    FIXED_ACCOUNTS
        .iter()
        .map(|&(username, password, email, role)| SeedUser {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        })
        .collect()
}

/// Generates `count` filler accounts from the given RNG. The output is a pure
/// function of the RNG state, so a seeded RNG reproduces the same accounts.
pub fn random_users<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<SeedUser> {
    (0..count)
        .map(|_| {
            let username = format!("user_{}", Alphanumeric.sample_string(rng, 5));
            let password = Alphanumeric.sample_string(rng, 10);
            let email = format!("{username}@example.com");
            let role = GENERATED_ROLES[rng.random_range(0..GENERATED_ROLES.len())].to_string();
            SeedUser {
                username,
                password,
                email,
                role,
            }
        })
        .collect()
}
