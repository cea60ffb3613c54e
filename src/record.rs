use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(Uuid);

impl UserId {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        UserId(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
        }
    }
}

/// ISO 3166-1 alpha-2 country with the bits needed for display and phone numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub calling_code: &'static str,
}

pub const COUNTRIES: &[Country] = &[
    Country { code: "AR", name: "Argentina", calling_code: "54" },
    Country { code: "AU", name: "Australia", calling_code: "61" },
    Country { code: "AT", name: "Austria", calling_code: "43" },
    Country { code: "BR", name: "Brazil", calling_code: "55" },
    Country { code: "CA", name: "Canada", calling_code: "1" },
    Country { code: "CH", name: "Switzerland", calling_code: "41" },
    Country { code: "CN", name: "China", calling_code: "86" },
    Country { code: "DE", name: "Germany", calling_code: "49" },
    Country { code: "DK", name: "Denmark", calling_code: "45" },
    Country { code: "EG", name: "Egypt", calling_code: "20" },
    Country { code: "ES", name: "Spain", calling_code: "34" },
    Country { code: "FI", name: "Finland", calling_code: "358" },
    Country { code: "FR", name: "France", calling_code: "33" },
    Country { code: "GB", name: "United Kingdom", calling_code: "44" },
    Country { code: "GH", name: "Ghana", calling_code: "233" },
    Country { code: "IE", name: "Ireland", calling_code: "353" },
    Country { code: "IN", name: "India", calling_code: "91" },
    Country { code: "IT", name: "Italy", calling_code: "39" },
    Country { code: "JP", name: "Japan", calling_code: "81" },
    Country { code: "KE", name: "Kenya", calling_code: "254" },
    Country { code: "KR", name: "South Korea", calling_code: "82" },
    Country { code: "MX", name: "Mexico", calling_code: "52" },
    Country { code: "NG", name: "Nigeria", calling_code: "234" },
    Country { code: "NL", name: "Netherlands", calling_code: "31" },
    Country { code: "NO", name: "Norway", calling_code: "47" },
    Country { code: "NZ", name: "New Zealand", calling_code: "64" },
    Country { code: "PL", name: "Poland", calling_code: "48" },
    Country { code: "PT", name: "Portugal", calling_code: "351" },
    Country { code: "SE", name: "Sweden", calling_code: "46" },
    Country { code: "US", name: "United States", calling_code: "1" },
    Country { code: "ZA", name: "South Africa", calling_code: "27" },
];

impl Country {
    pub fn lookup(code: &str) -> Option<&'static Country> {
        COUNTRIES.iter().find(|c| c.code == code)
    }
}

/// Turns an alpha-2 code into its flag emoji (pair of regional indicator symbols).
pub fn flag(code: &str) -> String {
    code.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .filter_map(|c| char::from_u32(0x1F1E6 + (c.to_ascii_uppercase() as u32 - 'A' as u32)))
        .collect()
}

/// Display label for a country code, e.g. "🇬🇭 Ghana". Unknown codes fall back to the code itself.
pub fn country_label(code: &str) -> String {
    match Country::lookup(code) {
        Some(country) => format!("{} {}", flag(code), country.name),
        None => format!("{} {}", flag(code), code),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub phone: String,
    pub country_code: String,
    pub status: UserStatus,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnKey {
    FirstName,
    LastName,
    DateOfBirth,
    Email,
    Phone,
    Country,
    Status,
}

impl ColumnKey {
    /// All data columns in display order.
    pub const ALL: [ColumnKey; 7] = [
        ColumnKey::FirstName,
        ColumnKey::LastName,
        ColumnKey::DateOfBirth,
        ColumnKey::Email,
        ColumnKey::Phone,
        ColumnKey::Country,
        ColumnKey::Status,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ColumnKey::FirstName => "First name",
            ColumnKey::LastName => "Last name",
            ColumnKey::DateOfBirth => "Date of birth",
            ColumnKey::Email => "Email",
            ColumnKey::Phone => "Contact",
            ColumnKey::Country => "Country",
            ColumnKey::Status => "Status",
        }
    }

    // Country codes only ever compare by equality.
    pub fn is_sortable(&self) -> bool {
        !matches!(self, ColumnKey::Country)
    }

    /// Natural ordering of two records on this column, `None` for unsortable columns.
    pub fn compare(&self, a: &UserRecord, b: &UserRecord) -> Option<Ordering> {
        let ordering = match self {
            ColumnKey::FirstName => a.first_name.cmp(&b.first_name),
            ColumnKey::LastName => a.last_name.cmp(&b.last_name),
            ColumnKey::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
            ColumnKey::Email => a.email.cmp(&b.email),
            ColumnKey::Phone => a.phone.cmp(&b.phone),
            ColumnKey::Status => a.status.cmp(&b.status),
            ColumnKey::Country => return None,
        };
        Some(ordering)
    }

    pub fn cell(&self, record: &UserRecord, date_format: &str) -> String {
        match self {
            ColumnKey::FirstName => record.first_name.clone(),
            ColumnKey::LastName => record.last_name.clone(),
            ColumnKey::DateOfBirth => record.date_of_birth.format(date_format).to_string(),
            ColumnKey::Email => record.email.clone(),
            ColumnKey::Phone => record.phone.clone(),
            ColumnKey::Country => country_label(&record.country_code),
            ColumnKey::Status => record.status.label().to_string(),
        }
    }
}
