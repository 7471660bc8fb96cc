use thiserror::Error;

/// Errors raised while bringing up a test container.
#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("container error: {0}")]
    Container(#[from] testcontainers::TestcontainersError),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("redis did not answer PING after {attempts} attempts")]
    NotReady { attempts: u32 },
}

pub type Result<T> = std::result::Result<T, TestInfraError>;
