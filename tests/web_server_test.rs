#![cfg(feature = "web")]

use lucky_draw::web::{self, AppState};
use lucky_draw::RosterStore;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

async fn spawn_server(participants: PathBuf) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = web::router(AppState::new(participants).unwrap());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_submit_creates_file_with_header() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("data").join("participants.csv");
    let base = spawn_server(csv_path.clone()).await;

    let response = client()
        .post(format!("{}/submit", base))
        .form(&[("department", "Eng"), ("name", "Carol")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()["location"].to_str().unwrap().to_string();
    assert!(location.starts_with("/?flash=Added+participant"));
    assert!(location.ends_with("level=success"));

    let response = client()
        .post(format!("{}/submit", base))
        .form(&[("department", " Sales "), ("name", "Dan")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert_eq!(
        fs::read_to_string(&csv_path).unwrap(),
        "department,name\nEng,Carol\nSales,Dan\n"
    );
}

#[tokio::test]
async fn test_concurrent_submissions_all_land() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("participants.csv");
    let base = spawn_server(csv_path.clone()).await;

    let mut handles = Vec::new();
    for i in 0..12 {
        let url = format!("{}/submit", base);
        handles.push(tokio::spawn(async move {
            client()
                .post(url)
                .form(&[("department", "Eng".to_string()), ("name", format!("P{}", i))])
                .send()
                .await
                .unwrap()
                .status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::SEE_OTHER);
    }

    let content = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], "department,name");
    assert_eq!(
        lines.iter().filter(|l| **l == "department,name").count(),
        1
    );
    for i in 0..12 {
        assert!(lines.contains(&format!("Eng,P{}", i).as_str()));
    }
}

#[tokio::test]
async fn test_submit_rejects_empty_fields() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("participants.csv");
    let base = spawn_server(csv_path.clone()).await;

    let response = client()
        .post(format!("{}/submit", base))
        .form(&[("department", "Eng"), ("name", "   ")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()["location"].to_str().unwrap().to_string();
    assert!(location.ends_with("level=error"));

    // 缺少欄位也視為驗證失敗
    let response = client()
        .post(format!("{}/submit", base))
        .form(&[("name", "Carol")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert!(!csv_path.exists());
}

#[tokio::test]
async fn test_index_renders_flash() {
    let temp_dir = TempDir::new().unwrap();
    let base = spawn_server(temp_dir.path().join("participants.csv")).await;

    let body = client()
        .get(format!(
            "{}/?flash=Department+and+name+are+both+required&level=error",
            base
        ))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("<form action=\"/submit\" method=\"post\">"));
    assert!(body.contains("flash error"));
    assert!(body.contains("Department and name are both required"));
}

#[tokio::test]
async fn test_index_escapes_flash_markup() {
    let temp_dir = TempDir::new().unwrap();
    let base = spawn_server(temp_dir.path().join("participants.csv")).await;

    let body = client()
        .get(format!("{}/?flash=%3Cscript%3Ealert(1)%3C%2Fscript%3E&level=success", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("flash success"));
    assert!(body.contains("&lt;script&gt;alert(1)"));
    assert!(!body.contains("<script>"));
}

#[tokio::test]
async fn test_participants_lists_rows() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("participants.csv");
    let store = RosterStore::new(&csv_path);
    store
        .append(&lucky_draw::Participant::new("Eng", "Alice"))
        .unwrap();
    store
        .append(&lucky_draw::Participant::new("R&D", "Bob"))
        .unwrap();
    let base = spawn_server(csv_path).await;

    let response = client()
        .get(format!("{}/participants", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();

    assert!(body.contains("2 registered"));
    assert!(body.contains("<td>Eng</td><td>Alice</td>"));
    assert!(body.contains("<td>R&amp;D</td><td>Bob</td>"));
}

#[tokio::test]
async fn test_participants_empty_and_broken_sources() {
    let temp_dir = TempDir::new().unwrap();
    let missing = spawn_server(temp_dir.path().join("missing.csv")).await;

    let body = client()
        .get(format!("{}/participants", missing))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("No participants registered yet."));

    let broken_path = temp_dir.path().join("broken.csv");
    fs::write(&broken_path, "name\nAlice\n").unwrap();
    let broken = spawn_server(broken_path).await;

    let body = client()
        .get(format!("{}/participants", broken))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Could not read participant list"));
}

#[tokio::test]
async fn test_health() {
    let temp_dir = TempDir::new().unwrap();
    let base = spawn_server(temp_dir.path().join("participants.csv")).await;

    let body = client()
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "ok");
}
