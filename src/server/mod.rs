//! Build-then-serve workflow for WebAssembly bundles.
//!
//! [`Server`] validates its options, packages the application for the web
//! through the [`Packager`] and serves the resulting `wasm/` directory over
//! HTTP until shut down.

mod files;

pub use files::router;

use crate::{
    bundler::{
        PackageSettings, PackageType, Packager, SettingsBuilder, platform::wasm::WEB_DIR_NAME,
    },
    error::{BundlerError, CliError, Result},
};
use socket2::{Domain, Protocol, Socket, Type};
use std::{
    future::Future,
    io,
    net::{Ipv4Addr, Ipv6Addr, SocketAddr},
    path::PathBuf,
};
use tokio::net::TcpListener;

/// Port used when none (or zero) is configured.
pub const DEFAULT_PORT: u16 = 8080;

/// Options of the `serve` command.
#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    /// Project directory to package; None means the current directory.
    pub source_dir: Option<PathBuf>,

    /// Icon source image; None means `Icon.png` in the source directory.
    pub icon: Option<PathBuf>,

    /// Requested port; zero selects [`DEFAULT_PORT`].
    pub port: i64,

    /// Positional arguments, which the command does not accept.
    pub args: Vec<String>,
}

/// Packages an application as WebAssembly and serves it over HTTP.
///
/// Every call to [`Server::serve`] builds its own router and listener, so
/// several servers can run in one process.
#[derive(Debug)]
pub struct Server {
    options: ServeOptions,
    package: PackageSettings,
}

impl Server {
    /// Creates a server for the given options and application metadata.
    pub fn new(options: ServeOptions, package: PackageSettings) -> Self {
        Self { options, package }
    }

    /// Currently configured port.
    pub fn port(&self) -> i64 {
        self.options.port
    }

    /// Replaces the application metadata used by [`Server::build`].
    pub fn set_package_settings(&mut self, package: PackageSettings) {
        self.package = package;
    }

    /// Checks the options before any packaging work happens.
    ///
    /// A zero port becomes [`DEFAULT_PORT`]; ports outside `1..=65535` and
    /// positional arguments are rejected.
    pub fn validate(&mut self) -> Result<u16> {
        if !self.options.args.is_empty() {
            return Err(CliError::UnexpectedArguments {
                arguments: self.options.args.clone(),
            }
            .into());
        }

        if self.options.port == 0 {
            self.options.port = i64::from(DEFAULT_PORT);
        }
        match u16::try_from(self.options.port) {
            Ok(port) if port != 0 => Ok(port),
            _ => Err(CliError::InvalidPort {
                port: self.options.port,
            }
            .into()),
        }
    }

    /// Packages the application for the web.
    ///
    /// Returns the session describing what will be served.
    pub async fn build(&self, port: u16) -> Result<ServerSession> {
        let mut builder = SettingsBuilder::new()
            .package_type(PackageType::Wasm)
            .package_settings(self.package.clone());
        if let Some(dir) = &self.options.source_dir {
            builder = builder.source_directory(dir);
        }
        if let Some(icon) = &self.options.icon {
            builder = builder.icon(icon);
        }

        let packager = Packager::new(builder.build()?);
        packager.package().await?;

        Ok(ServerSession {
            port,
            app_id: packager.settings().app_id().to_string(),
            output_dir: packager.output_directory().to_path_buf(),
        })
    }

    /// Validates, builds and serves until Ctrl-C is received.
    pub async fn serve(&mut self) -> Result<()> {
        self.serve_with_shutdown(shutdown_signal()).await
    }

    /// Validates, builds and serves until `shutdown` completes.
    ///
    /// Nothing is bound when validation or packaging fails. A bind failure
    /// is returned as is; no other port is tried.
    pub async fn serve_with_shutdown<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let port = self.validate()?;
        let session = self.build(port).await?;
        session.listen(shutdown).await
    }
}

/// State of one `serve` invocation.
#[derive(Debug, Clone)]
pub struct ServerSession {
    port: u16,
    app_id: String,
    output_dir: PathBuf,
}

impl ServerSession {
    /// Port the listener binds to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Directory served to clients.
    pub fn web_dir(&self) -> PathBuf {
        self.output_dir.join(WEB_DIR_NAME)
    }

    /// Binds all interfaces on the session port and serves the web directory.
    ///
    /// IPv4 and IPv6 clients are both accepted. Hosts without IPv6 support
    /// fall back to IPv4 only.
    pub async fn listen<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (listener, addr) = bind_all_interfaces(self.port)?;

        println!("Serving {} at: http://localhost:{}", self.app_id, self.port);
        log::info!("Serving {} on {}", self.web_dir().display(), addr);

        axum::serve(listener, router(self.web_dir()))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|error| listener_error(addr, error))
    }
}

fn bind_all_interfaces(port: u16) -> Result<(TcpListener, SocketAddr)> {
    let v6 = SocketAddr::from((Ipv6Addr::UNSPECIFIED, port));
    match dual_stack_socket().and_then(|socket| listen_on(socket, v6)) {
        Ok(listener) => return Ok((listener, v6)),
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => return Err(listener_error(v6, e)),
        Err(e) => log::debug!("IPv6 is unavailable ({e}), listening on IPv4 only"),
    }

    let v4 = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))
        .and_then(|socket| listen_on(socket, v4))
        .map(|listener| (listener, v4))
        .map_err(|e| listener_error(v4, e))
}

fn listener_error(addr: SocketAddr, error: io::Error) -> BundlerError {
    BundlerError::Listener {
        addr: addr.to_string(),
        error,
    }
}

fn dual_stack_socket() -> io::Result<Socket> {
    let socket = Socket::new(Domain::IPV6, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_only_v6(false)?;
    Ok(socket)
}

fn listen_on(socket: Socket, addr: SocketAddr) -> io::Result<TcpListener> {
    #[cfg(unix)]
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    TcpListener::from_std(socket.into())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Cannot listen for Ctrl-C, serving until the process ends: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
