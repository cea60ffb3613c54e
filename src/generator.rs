use chrono::{NaiveDate, TimeDelta};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::record::{COUNTRIES, UserId, UserRecord, UserStatus};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Adwoa", "Aiko", "Amara", "Ana", "Arjun", "Ben", "Carla", "Chen", "Chidi", "Clara",
    "Dmitri", "Edwin", "Elena", "Emeka", "Farah", "Felix", "Grace", "Hana", "Hugo", "Ines",
    "Ivan", "Jonas", "Kelcy", "Kofi", "Lars", "Leila", "Lucas", "Maya", "Mei", "Nadia", "Noah",
    "Olga", "Omar", "Paula", "Priya", "Rafael", "Rosa", "Sami", "Sofia", "Tariq", "Theo",
    "Uma", "Victor", "Wanjiru", "Yara", "Yusuf", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Adeyemi", "Andersen", "Becker", "Boateng", "Costa", "Dubois", "Fernandez", "Fischer",
    "Garcia", "Haddad", "Hansen", "Ivanova", "Jensen", "Kamau", "Kim", "Kowalski", "Larsen",
    "Lee", "Martinson", "Mensah", "Moreau", "Müller", "Nakamura", "Novak", "Okafor", "Oliveira",
    "Owusu", "Patel", "Rossi", "Sato", "Schmidt", "Silva", "Singh", "Smith", "Tanaka",
    "Virtanen", "Wang", "Williams", "Yilmaz", "Zhang",
];

const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "outlook.com",
    "yahoo.com",
    "hotmail.com",
    "proton.me",
    "example.org",
];

const MIN_AGE_DAYS: i64 = 18 * 365;
const MAX_AGE_DAYS: i64 = 40 * 365;

/// Generates `count` random users. The same `seed` always yields the same users.
pub fn generate_users(count: usize, seed: Option<u64>, today: NaiveDate) -> Vec<UserRecord> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let users: Vec<UserRecord> = (0..count).map(|_| random_user(&mut rng, today)).collect();
    info!("Generated {} users (seed: {:?})", users.len(), seed);
    users
}

fn random_user(rng: &mut StdRng, today: NaiveDate) -> UserRecord {
    let first_name = pick(rng, FIRST_NAMES);
    let last_name = pick(rng, LAST_NAMES);
    let country = COUNTRIES.choose(rng).unwrap_or(&COUNTRIES[0]);

    let age_days = rng.random_range(MIN_AGE_DAYS..=MAX_AGE_DAYS);
    let date_of_birth = today - TimeDelta::days(age_days);

    let email = format!(
        "{}.{}{}@{}",
        email_part(first_name),
        email_part(last_name),
        rng.random_range(1..100),
        pick(rng, EMAIL_DOMAINS)
    );
    let phone = format!(
        "+{} {:02} {:03} {:04}",
        country.calling_code,
        rng.random_range(10..100),
        rng.random_range(0..1000),
        rng.random_range(0..10000)
    );
    let status = if rng.random_bool(0.5) {
        UserStatus::Active
    } else {
        UserStatus::Inactive
    };

    let user = UserRecord {
        id: UserId::from_bytes(rng.random()),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        date_of_birth,
        email,
        phone,
        country_code: country.code.to_string(),
        status,
    };
    debug!("Generated user {} {}", user.id, user.full_name());
    user
}

fn pick<'a>(rng: &mut StdRng, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

// Lowercase ASCII only, so names like "Müller" still give a valid local part.
fn email_part(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
