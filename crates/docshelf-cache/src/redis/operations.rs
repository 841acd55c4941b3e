//! Redis cache provider.
//!
//! Each operation is a single command on the shared connection manager.
//! `INCR` is atomic on the server, so rate-limit counters stay exact
//! across processes.

use std::time::Duration;

use async_trait::async_trait;
use redis::{Cmd, FromRedisValue};

use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::result::AppResult;
use docshelf_core::traits::cache::CacheProvider;

use super::client::RedisClient;

/// Redis-backed cache provider.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    client: RedisClient,
}

impl RedisCacheProvider {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// A command named `name` whose first argument is the prefixed `key`.
    fn keyed(&self, name: &str, key: &str) -> Cmd {
        let mut cmd = redis::cmd(name);
        cmd.arg(self.client.key(key));
        cmd
    }

    async fn run<T: FromRedisValue>(&self, op: &'static str, cmd: &Cmd) -> AppResult<T> {
        let mut conn = self.client.connection();
        cmd.query_async(&mut conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Cache, format!("Redis {op} failed: {e}"), e))
    }
}

/// Redis expiries are whole seconds; anything shorter rounds up to one.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.run("GET", &self.keyed("GET", key)).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let mut cmd = self.keyed("SET", key);
        cmd.arg(value).arg("EX").arg(ttl_seconds(ttl));
        self.run("SET", &cmd).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let _removed: i64 = self.run("DEL", &self.keyed("DEL", key)).await?;
        Ok(())
    }

    async fn incr(&self, key: &str) -> AppResult<i64> {
        self.run("INCR", &self.keyed("INCR", key)).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        let mut cmd = self.keyed("EXPIRE", key);
        cmd.arg(ttl_seconds(ttl));
        self.run("EXPIRE", &cmd).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        let pong: String = self.run("PING", &redis::cmd("PING")).await?;
        Ok(pong == "PONG")
    }
}
