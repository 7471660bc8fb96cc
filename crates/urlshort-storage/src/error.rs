use thiserror::Error;

/// Invalid backend configuration, caught before any connection is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("expiration must be at least one minute")]
    ZeroTtl,
    #[error("expiration must be at most {max} minutes, got {minutes}")]
    TtlTooLarge { minutes: u64, max: u64 },
    #[error("redis host must not be empty")]
    EmptyHost,
}

/// Failure to bring up a backend.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid storage configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to connect to redis: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Longest accepted expiration: one hundred years.
pub const MAX_TTL_MINUTES: u64 = 100 * 365 * 24 * 60;

/// Checks `ttl_minutes` and converts it to whole seconds.
pub(crate) fn ttl_seconds(ttl_minutes: u64) -> Result<i64, ConfigError> {
    if ttl_minutes == 0 {
        return Err(ConfigError::ZeroTtl);
    }
    let too_large = ConfigError::TtlTooLarge {
        minutes: ttl_minutes,
        max: MAX_TTL_MINUTES,
    };
    if ttl_minutes > MAX_TTL_MINUTES {
        return Err(too_large);
    }
    ttl_minutes
        .checked_mul(60)
        .and_then(|secs| i64::try_from(secs).ok())
        .ok_or(too_large)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_bounds() {
        assert_eq!(ttl_seconds(0), Err(ConfigError::ZeroTtl));
        assert_eq!(ttl_seconds(1), Ok(60));
        assert_eq!(
            ttl_seconds(MAX_TTL_MINUTES),
            Ok(MAX_TTL_MINUTES as i64 * 60)
        );
        for minutes in [MAX_TTL_MINUTES + 1, 10_000_000_000, u64::MAX] {
            assert!(matches!(
                ttl_seconds(minutes),
                Err(ConfigError::TtlTooLarge { .. })
            ));
        }
    }
}
