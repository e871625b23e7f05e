//! Established connection wrapper.

use mysql_async::Conn;
use mysql_async::prelude::*;
use tracing::debug;

use crate::error::ClientResult;

/// An established server connection.
///
/// Everything past establishment — queries, transactions, pooling — is
/// the driver's business; reach it through [`inner_mut`] or
/// [`into_inner`].
///
/// [`inner_mut`]: Connection::inner_mut
/// [`into_inner`]: Connection::into_inner
pub struct Connection {
    conn: Conn,
}

impl Connection {
    /// Wrap an established driver connection.
    pub fn new(conn: Conn) -> Self {
        Self { conn }
    }

    /// Connection id assigned by the server.
    pub fn id(&self) -> u32 {
        self.conn.id()
    }

    /// Check the connection with a server round trip.
    pub async fn ping(&mut self) -> ClientResult<()> {
        debug!("ping");
        self.conn.ping().await?;
        Ok(())
    }

    /// Close the connection cleanly.
    pub async fn disconnect(self) -> ClientResult<()> {
        debug!("disconnect");
        self.conn.disconnect().await?;
        Ok(())
    }

    /// Get the inner connection.
    pub fn inner(&self) -> &Conn {
        &self.conn
    }

    /// Get the inner connection mutably.
    pub fn inner_mut(&mut self) -> &mut Conn {
        &mut self.conn
    }

    /// Consume and return the inner connection.
    pub fn into_inner(self) -> Conn {
        self.conn
    }
}
