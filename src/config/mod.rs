use std::env;
use std::time::Duration;

const DEFAULT_JWT_EXPIRY: Duration = Duration::from_secs(3 * 24 * 60 * 60);

/// Environment-sourced settings with the same defaults the service has
/// always shipped with. Constructed once in `main` and passed down
/// explicitly; nothing reads the environment after startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub test_database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiry: Duration,
    pub client_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/meal_revival_demo".to_string()),
            test_database_url: env::var("TEST_DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/meal_revival_test".to_string()),
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8080),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "SECRETTESTINGKEY".to_string()),
            jwt_expiry: env::var("JWT_EXPIRY")
                .ok()
                .and_then(|v| parse_duration(&v))
                .unwrap_or(DEFAULT_JWT_EXPIRY),
            client_origin: env::var("CLIENT_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }
}

/// Parse `90s` / `30m` / `12h` / `3d` style durations; a bare integer is
/// taken as seconds.
fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let (number, unit) = match value.char_indices().last()? {
        (idx, c) if c.is_ascii_alphabetic() => (&value[..idx], Some(c)),
        _ => (value, None),
    };

    let number: u64 = number.trim().parse().ok()?;
    let secs = match unit {
        None | Some('s') => number,
        Some('m') => number * 60,
        Some('h') => number * 60 * 60,
        Some('d') => number * 24 * 60 * 60,
        _ => return None,
    };
    Some(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_suffixed_durations() {
        assert_eq!(parse_duration("3d"), Some(Duration::from_secs(259_200)));
        assert_eq!(parse_duration("12h"), Some(Duration::from_secs(43_200)));
        assert_eq!(parse_duration("45m"), Some(Duration::from_secs(2_700)));
        assert_eq!(parse_duration("90s"), Some(Duration::from_secs(90)));
    }

    #[test]
    fn bare_integers_are_seconds() {
        assert_eq!(parse_duration("90"), Some(Duration::from_secs(90)));
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("d"), None);
        assert_eq!(parse_duration("3w"), None);
        assert_eq!(parse_duration("soon"), None);
    }

    #[test]
    fn default_expiry_is_three_days() {
        assert_eq!(DEFAULT_JWT_EXPIRY, Duration::from_secs(3 * 24 * 60 * 60));
    }
}
