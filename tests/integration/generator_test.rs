use std::io::{Read, Write};
use std::net::TcpListener;
use std::process::Command;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use anyhow::{anyhow, Result};

use schemabot::assistant::canned::APOLOGY;
use schemabot::assistant::{
    Assistant, ChatSession, GenerationRequest, HttpGenerator, ReplySource, ResponseGenerator,
    StaticCredentials,
};
use schemabot::config::AssistantConfig;

#[path = "../common/mod.rs"]
mod common;

const ANSWER_BODY: &str =
    r#"{"candidates":[{"content":{"parts":[{"text":"**Tablas**. Hay tres tablas."}]}}]}"#;

/// Serve one HTTP exchange on a local port, returning the base URL and the raw request
fn serve_once(status: &'static str, body: &'static str) -> Result<(String, JoinHandle<Result<String>>)> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let base = format!("http://{}/v1beta", listener.local_addr()?);

    let handle = thread::spawn(move || -> Result<String> {
        let (mut stream, _) = listener.accept()?;
        stream.set_read_timeout(Some(Duration::from_secs(10)))?;

        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf)?;
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request_complete(&request) {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes())?;
        stream.flush()?;
        Ok(String::from_utf8_lossy(&request).into_owned())
    });

    Ok((base, handle))
}

/// Whether headers and the full Content-Length body have arrived
fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= header_end + 4 + content_length
}

fn join(handle: JoinHandle<Result<String>>) -> Result<String> {
    handle.join().map_err(|_| anyhow!("server thread panicked"))?
}

#[test]
fn test_http_generator_posts_prompt_with_key() -> Result<()> {
    let (base, server) = serve_once("200 OK", ANSWER_BODY)?;
    let generator = HttpGenerator::new(base, "gemini-pro", Duration::from_secs(10))?;

    let answer = generator.generate(&GenerationRequest {
        prompt: "¿Qué tablas hay?",
        api_key: "secret-key",
    })?;
    assert_eq!(answer, "**Tablas**. Hay tres tablas.");

    let request = join(server)?;
    let lowered = request.to_lowercase();
    assert!(request.starts_with("POST /v1beta/models/gemini-pro:generateContent HTTP/1.1"));
    assert!(lowered.contains("x-goog-api-key: secret-key"));
    assert!(lowered.contains("content-type: application/json"));
    assert!(request.contains(r#"{"contents":[{"parts":[{"text":"¿Qué tablas hay?"}]}]}"#));
    Ok(())
}

#[test]
fn test_error_status_becomes_apology() -> Result<()> {
    let (base, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#)?;
    let generator = HttpGenerator::new(base, "gemini-pro", Duration::from_secs(10))?;
    let assistant = Assistant::new(
        AssistantConfig::default().with_credentials(Arc::new(StaticCredentials::new("secret-key"))),
    )
    .with_generator(Box::new(generator));

    let reply = assistant.reply(&ChatSession::new(), "hola")?;
    join(server)?;

    assert_eq!(reply.source, ReplySource::Apology);
    assert_eq!(reply.text, APOLOGY);
    Ok(())
}

#[test]
fn test_cli_ask_uses_api_when_key_is_set() -> Result<()> {
    let (base, server) = serve_once("200 OK", ANSWER_BODY)?;
    let dir = tempfile::tempdir()?;
    let sql = common::write_sql_file(common::CEMETERY_SCHEMA)?;

    let output = Command::new(env!("CARGO_BIN_EXE_schemabot"))
        .env("SCHEMABOT_API_KEY", "cli-key")
        .arg("--history-file")
        .arg(dir.path().join("conversations.bin"))
        .arg("--api-base")
        .arg(&base)
        .args(["ask", "¿Cuántas tablas hay?", "--sql"])
        .arg(sql.path())
        .output()?;
    assert!(output.status.success(), "ask command failed");

    // Answer comes back through the formatter
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Tablas.\n\nHay tres tablas."));

    let request = join(server)?;
    assert!(request.to_lowercase().contains("x-goog-api-key: cli-key"));
    assert!(request.contains("CREATE TABLE"));
    Ok(())
}
