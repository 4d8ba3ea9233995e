mod common;

use kodegen_bundler_app::{
    BundlerError, CliError,
    bundler::PackageSettings,
    server::{DEFAULT_PORT, ServeOptions, Server, router},
};
use std::{path::Path, time::Duration};

fn server_with_port(port: i64) -> Server {
    Server::new(
        ServeOptions {
            port,
            ..Default::default()
        },
        PackageSettings::default(),
    )
}

fn demo_package() -> PackageSettings {
    PackageSettings {
        product_name: "Demo".into(),
        app_id: "com.example.demo".into(),
        ..Default::default()
    }
}

#[test]
fn zero_port_becomes_the_default() {
    let mut server = server_with_port(0);
    assert_eq!(server.validate().unwrap(), DEFAULT_PORT);
    assert_eq!(server.port(), 8080);
}

#[test]
fn in_range_port_is_kept() {
    let mut server = server_with_port(443);
    assert_eq!(server.validate().unwrap(), 443);
    assert_eq!(server.port(), 443);
}

#[test]
fn out_of_range_ports_are_rejected() {
    for port in [-1, 65536] {
        let err = server_with_port(port).validate().unwrap_err();
        match err {
            BundlerError::Cli(CliError::InvalidPort { port: got }) => assert_eq!(got, port),
            other => panic!("unexpected error for {port}: {other}"),
        }
    }
}

#[test]
fn positional_arguments_are_rejected() {
    let mut server = Server::new(
        ServeOptions {
            port: 8080,
            args: vec!["extra".into()],
            ..Default::default()
        },
        PackageSettings::default(),
    );
    assert!(matches!(
        server.validate(),
        Err(BundlerError::Cli(CliError::UnexpectedArguments { .. }))
    ));
}

#[tokio::test]
async fn missing_icon_fails_without_binding() {
    let dir = tempfile::tempdir().unwrap();
    common::write_wasm(&dir.path().join("demo.wasm"));
    let port = common::free_port();

    let mut server = Server::new(
        ServeOptions {
            source_dir: Some(dir.path().to_path_buf()),
            icon: Some(dir.path().join("missing.png")),
            port: i64::from(port),
            args: vec![],
        },
        demo_package(),
    );

    let result = server.serve_with_shutdown(async {}).await;
    assert!(result.is_err());
    assert!(common::port_is_free(port));
    assert!(!dir.path().join("wasm").exists());
}

async fn get(url: &str) -> reqwest::Response {
    let client = reqwest::Client::new();
    for _ in 0..100 {
        if let Ok(response) = client.get(url).send().await {
            return response;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("server at {url} never answered");
}

#[tokio::test]
async fn serves_the_packaged_web_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().to_path_buf();
    common::write_wasm(&src.join("demo.wasm"));
    common::write_png(&src.join("Icon.png"), 48, 48, [0, 200, 0, 255]);
    let port = common::free_port();

    let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
    let mut server = Server::new(
        ServeOptions {
            source_dir: Some(src.clone()),
            icon: None,
            port: i64::from(port),
            args: vec![],
        },
        demo_package(),
    );
    let handle = tokio::spawn(async move {
        server
            .serve_with_shutdown(async {
                let _ = stopped.await;
            })
            .await
    });

    let base = format!("http://127.0.0.1:{port}");

    let index = get(&format!("{base}/")).await;
    assert_eq!(index.status(), 200);
    let body = index.text().await.unwrap();
    assert!(body.contains("<title>Demo</title>"));
    assert!(body.contains("demo.wasm"));

    let module = get(&format!("{base}/demo.wasm")).await;
    assert_eq!(module.status(), 200);
    assert_eq!(
        module.headers()["content-type"].to_str().unwrap(),
        "application/wasm"
    );
    assert_eq!(module.bytes().await.unwrap().as_ref(), common::WASM_HEADER);

    let icon = get(&format!("{base}/icon.png")).await;
    assert_eq!(icon.status(), 200);
    assert!(image::load_from_memory(&icon.bytes().await.unwrap()).is_ok());

    assert_eq!(get(&format!("{base}/missing.txt")).await.status(), 404);

    if ipv6_loopback_available() {
        let v6 = get(&format!("http://[::1]:{port}/demo.wasm")).await;
        assert_eq!(v6.status(), 200);
    }

    stop.send(()).unwrap();
    handle.await.unwrap().unwrap();

    assert!(web_file(&src, "index.html"));
    assert!(common::port_is_free(port));
}

#[tokio::test]
async fn busy_port_is_a_listener_error() {
    let dir = tempfile::tempdir().unwrap();
    common::write_wasm(&dir.path().join("demo.wasm"));
    common::write_png(&dir.path().join("Icon.png"), 16, 16, [1, 2, 3, 255]);
    let blocker = std::net::TcpListener::bind(("0.0.0.0", 0)).unwrap();
    let port = blocker.local_addr().unwrap().port();

    let mut server = Server::new(
        ServeOptions {
            source_dir: Some(dir.path().to_path_buf()),
            port: i64::from(port),
            ..Default::default()
        },
        demo_package(),
    );

    let err = server.serve_with_shutdown(async {}).await.unwrap_err();
    assert!(matches!(err, BundlerError::Listener { .. }), "unexpected error: {err}");
    drop(blocker);
}

fn web_file(src: &Path, name: &str) -> bool {
    src.join("wasm").join(name).is_file()
}

fn ipv6_loopback_available() -> bool {
    std::net::TcpListener::bind("[::1]:0").is_ok()
}

/// Serves `root` on an ephemeral loopback port, returning its base URL.
async fn serve_dir(root: &Path) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(root.to_path_buf());
    tokio::spawn(async move { axum::serve(listener, app).await });
    format!("http://{addr}")
}

#[tokio::test]
async fn directories_redirect_to_their_slash_form() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    let base = serve_dir(dir.path()).await;

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let response = client.get(format!("{base}/sub")).send().await.unwrap();

    assert!(response.status().is_redirection(), "{}", response.status());
    assert_eq!(response.headers()["location"].to_str().unwrap(), "/sub/");
}

#[tokio::test]
async fn directories_serve_their_index_page() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("site")).unwrap();
    std::fs::write(dir.path().join("site/index.html"), "<h1>site</h1>").unwrap();
    let base = serve_dir(dir.path()).await;

    let response = get(&format!("{base}/site/")).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "<h1>site</h1>");
}

#[cfg(unix)]
#[tokio::test]
async fn directories_without_index_are_listed_with_escaped_links() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("sub");
    std::fs::create_dir_all(sub.join("nested")).unwrap();
    std::fs::write(sub.join("a#b.txt"), "hash").unwrap();
    std::fs::write(sub.join("c?d.txt"), "query").unwrap();
    let base = serve_dir(dir.path()).await;

    let listing = get(&format!("{base}/sub/")).await;
    assert_eq!(listing.status(), 200);
    let body = listing.text().await.unwrap();
    assert!(body.contains(r#"<a href="a%23b.txt">a#b.txt</a>"#), "{body}");
    assert!(body.contains(r#"<a href="c%3Fd.txt">c?d.txt</a>"#), "{body}");
    assert!(body.contains(r#"<a href="nested/">nested/</a>"#), "{body}");

    let file = get(&format!("{base}/sub/a%23b.txt")).await;
    assert_eq!(file.status(), 200);
    assert_eq!(file.text().await.unwrap(), "hash");
}

#[tokio::test]
async fn build_packages_into_the_served_directory() {
    let dir = tempfile::tempdir().unwrap();
    common::write_wasm(&dir.path().join("demo.wasm"));
    common::write_png(&dir.path().join("Icon.png"), 16, 16, [1, 2, 3, 255]);

    let server = Server::new(
        ServeOptions {
            source_dir: Some(dir.path().to_path_buf()),
            port: 9000,
            ..Default::default()
        },
        demo_package(),
    );
    let session = server.build(9000).await.unwrap();

    assert_eq!(session.port(), 9000);
    assert!(session.web_dir().ends_with("wasm"));
    assert!(session.web_dir().join("index.html").is_file());
    assert!(session.web_dir().join("demo.wasm").is_file());
}
