//! Integration tests for `PackBuild::execute`.
//!
//! Both collaborators are replaced with recording fakes so the tests cover
//! argument hand-off, log capture, and result correlation without a real
//! `pack` or `docker` installation.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::sync::{Arc, Mutex};

use occam_common::error::{OccamError, Result};
use occam_docker::{DockerError, Image, ImageClient};
use occam_exec::{ExecOutput, Executable, Execution};
use occam_pack::{Pack, PackError};

// ── Fakes ────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeExecutable {
    calls: Mutex<Vec<Vec<String>>>,
    stdout: String,
    stderr: String,
    fail_with: Option<i32>,
}

impl FakeExecutable {
    fn writing(stdout: &str, stderr: &str) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            ..Self::default()
        }
    }

    fn failing(self, code: i32) -> Self {
        Self {
            fail_with: Some(code),
            ..self
        }
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl Executable for FakeExecutable {
    fn execute(&self, execution: Execution<'_>) -> Result<ExecOutput> {
        self.calls.lock().unwrap().push(execution.args.clone());
        if let Some(sink) = execution.stdout {
            sink.write_all(self.stdout.as_bytes()).unwrap();
        }
        if let Some(sink) = execution.stderr {
            sink.write_all(self.stderr.as_bytes()).unwrap();
        }
        match self.fail_with {
            Some(code) => Err(OccamError::CommandFailed {
                program: "pack".into(),
                code,
            }),
            None => Ok(ExecOutput {
                stdout: self.stdout.clone(),
                stderr: self.stderr.clone(),
            }),
        }
    }
}

struct FakeImageClient {
    calls: Mutex<Vec<String>>,
    image: Option<Image>,
}

impl FakeImageClient {
    fn returning(image: Image) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            image: Some(image),
        }
    }

    fn missing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            image: None,
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ImageClient for FakeImageClient {
    fn inspect(&self, reference: &str) -> std::result::Result<Image, DockerError> {
        self.calls.lock().unwrap().push(reference.to_string());
        self.image.clone().ok_or_else(|| DockerError::NotFound {
            reference: reference.to_string(),
        })
    }
}

fn sample_image() -> Image {
    Image {
        id: "sha256:0123456789abcdef".into(),
        env: vec!["PORT=8080".into()],
        ..Image::default()
    }
}

fn pack_with(executable: &Arc<FakeExecutable>, client: &Arc<FakeImageClient>) -> Pack {
    Pack::new()
        .with_executable(executable.clone())
        .with_image_client(client.clone())
}

// ── Success ──────────────────────────────────────────────────────────

#[test]
fn success_returns_inspected_image_and_full_log() {
    let executable = Arc::new(FakeExecutable::writing("===> DETECTING\n", "warning\n"));
    let client = Arc::new(FakeImageClient::returning(sample_image()));

    let (image, logs) = pack_with(&executable, &client)
        .build
        .execute("my-app", "/workspace/app")
        .expect("build should succeed");

    assert_eq!(image, sample_image());
    let text = logs.to_string();
    assert!(text.contains("===> DETECTING\n"));
    assert!(text.contains("warning\n"));
    assert_eq!(logs.len(), "===> DETECTING\nwarning\n".len());
    assert_eq!(client.calls(), ["my-app"]);
}

#[test]
fn execute_passes_assembled_args_to_executable() {
    let executable = Arc::new(FakeExecutable::default());
    let client = Arc::new(FakeImageClient::returning(sample_image()));

    let _ = pack_with(&executable, &client)
        .with_no_color()
        .build
        .with_buildpacks(["paketo-buildpacks/nodejs"])
        .with_env([("BP_NODE_VERSION", "20")])
        .with_no_pull()
        .execute("node-app", "/workspace/node")
        .expect("build should succeed");

    assert_eq!(
        executable.calls(),
        [[
            "build",
            "node-app",
            "--no-color",
            "--path",
            "/workspace/node",
            "--buildpack",
            "paketo-buildpacks/nodejs",
            "--env",
            "BP_NODE_VERSION=20",
            "--no-pull",
        ]]
    );
}

// ── Process failure ──────────────────────────────────────────────────

#[test]
fn process_failure_returns_prefixed_error_with_log() {
    let executable = Arc::new(
        FakeExecutable::writing(
            "===> DETECTING\n",
            "ERROR: No buildpack groups passed detection.\n",
        )
        .failing(1),
    );
    let client = Arc::new(FakeImageClient::returning(sample_image()));

    let err = pack_with(&executable, &client)
        .build
        .execute("my-app", "/workspace/app")
        .unwrap_err();

    assert!(err.to_string().starts_with("failed to pack build: "));
    assert!(err.to_string().contains("pack exited with status 1"));
    assert!(matches!(
        err,
        PackError::Process {
            source: OccamError::CommandFailed { code: 1, .. },
            ..
        }
    ));
    assert!(err.logs().to_string().contains("No buildpack groups passed detection"));
    assert!(client.calls().is_empty(), "inspection must be skipped");
}

#[test]
fn launch_failure_is_a_process_error() {
    let client = Arc::new(FakeImageClient::returning(sample_image()));
    let pack = Pack::new()
        .with_executable(Arc::new(occam_exec::ProcessExecutable::new(
            "occam-pack-binary-that-does-not-exist",
        )))
        .with_image_client(client.clone());

    let err = pack.build.execute("my-app", "/workspace/app").unwrap_err();

    assert!(matches!(
        err,
        PackError::Process {
            source: OccamError::NotFound { .. },
            ..
        }
    ));
    assert!(err.logs().is_empty());
    assert!(client.calls().is_empty());
}

// ── Inspection failure ───────────────────────────────────────────────

#[test]
fn inspection_failure_returns_prefixed_error_with_build_log() {
    let executable = Arc::new(FakeExecutable::writing("Successfully built image my-app\n", ""));
    let client = Arc::new(FakeImageClient::missing());

    let err = pack_with(&executable, &client)
        .build
        .execute("my-app", "/workspace/app")
        .unwrap_err();

    assert_eq!(err.to_string(), "failed to pack build: no such image: my-app");
    assert!(matches!(err, PackError::Inspect { .. }));
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(client.calls(), ["my-app"]);
    assert_eq!(err.into_logs().to_string(), "Successfully built image my-app\n");
}
