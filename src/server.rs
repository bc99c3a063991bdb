use crate::account::service::{AccountService, error_body};
use crate::constants::{BAD_REQUEST, NOT_FOUND};
use crate::req::Method::{DELETE, GET, POST, PUT};
use crate::req::Request;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot::Receiver;
use tracing::{error, info, warn};

pub struct Server {
    addr: String,
    account_svc: Arc<AccountService>,
}

impl Server {
    pub fn new(addr: impl Into<String>, account_svc: Arc<AccountService>) -> Self {
        Self {
            addr: addr.into(),
            account_svc,
        }
    }

    pub async fn start(&self, mut shutdown_rx: Receiver<()>) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("failed to bind {}", self.addr))?;
        info!("Server running on http://{}", self.addr);

        loop {
            tokio::select! {
                conn = listener.accept() => {
                    let (mut stream, _) = conn?;

                    let account_svc = Arc::clone(&self.account_svc);

                    tokio::spawn(async move {
                        let (reader, writer) = stream.split();
                        if let Err(e) = Self::handle_client(reader, writer, &account_svc).await {
                            error!("Connection error: {:#}", e);
                        }
                    });
                }
                // Shutdown signal check
                _ = &mut shutdown_rx => {
                    info!("Shutting down server...");
                    break;
                }
            }
        }
        Ok(())
    }

    pub async fn handle_client<Reader, Writer>(
        reader: Reader,
        mut writer: Writer,
        account_svc: &Arc<AccountService>,
    ) -> Result<()>
    where
        Reader: AsyncRead + Unpin,
        Writer: AsyncWrite + Unpin,
    {
        let (status_line, content) = match Request::new(reader).await {
            Ok(request) => Self::route(&request, account_svc).await,
            Err(e) => {
                warn!("Failed to read request: {:#}", e);
                error_body(BAD_REQUEST, "invalid request".to_string())
            }
        };

        writer
            .write_all(format!("{}{}", status_line, content).as_bytes())
            .await
            .context("Failed to write")?;
        writer.flush().await.context("Failed to flush")
    }

    async fn route(request: &Request, account_svc: &AccountService) -> (String, String) {
        let path = request.path.trim_end_matches('/');
        let tail = path.strip_prefix("/account/");

        match (&request.method, path, tail) {
            (GET, "/account", _) => account_svc.list().await,
            (POST, "/account", _) => account_svc.create(&request.body).await,
            (GET, _, Some(rest)) if rest.starts_with("number/") => {
                account_svc.get_by_number(&rest["number/".len()..]).await
            }
            (GET, _, Some(id)) => account_svc.get_by_id(id).await,
            (PUT, _, Some(id)) => account_svc.update(id, &request.body).await,
            (DELETE, _, Some(id)) => account_svc.delete(id).await,
            _ => error_body(NOT_FOUND, "route not found".to_string()),
        }
    }
}
