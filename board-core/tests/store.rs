use board_core::errors::{BoardError, ErrorKind};
use board_core::{Collection, Company, Job, MemoryCollection, Store};
use serde_json::{json, Map, Value};

fn job(id: &str, company_id: &str) -> Job {
    Job {
        id: id.to_string(),
        title: format!("title {id}"),
        description: String::new(),
        company_id: company_id.to_string(),
    }
}

fn fields(v: Value) -> Map<String, Value> {
    v.as_object().cloned().unwrap()
}

#[tokio::test]
async fn list_preserves_insertion_order() {
    let jobs = MemoryCollection::from_records(vec![job("j2", "c1"), job("j1", "c1"), job("j3", "c2")]);

    let ids: Vec<String> = jobs.list().await.unwrap().into_iter().map(|j| j.id).collect();
    assert_eq!(ids, vec!["j2", "j1", "j3"]);
}

#[tokio::test]
async fn get_missing_is_none_not_error() {
    let companies: MemoryCollection<Company> = MemoryCollection::new();
    assert!(companies.get("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn create_generates_id_and_appends() {
    let jobs = MemoryCollection::from_records(vec![job("j1", "c1")]);

    let id = jobs
        .create(fields(json!({
            "id": "client-chosen",
            "title": "Engineer",
            "description": "Builds things",
            "companyId": "c1"
        })))
        .await
        .unwrap();

    assert_ne!(id, "client-chosen");
    let created = jobs.get(&id).await.unwrap().unwrap();
    assert_eq!(created.title, "Engineer");
    assert_eq!(created.company_id, "c1");

    let all = jobs.list().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].id, id);
}

#[tokio::test]
async fn create_with_invalid_fields_is_unprocessable_and_writes_nothing() {
    let jobs: MemoryCollection<Job> = MemoryCollection::new();

    let err = jobs
        .create(fields(json!({ "description": "no title" })))
        .await
        .unwrap_err();

    let board = BoardError::from_anyhow(&err).unwrap();
    assert_eq!(board.kind, ErrorKind::Unprocessable);
    assert!(jobs.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn load_dir_reads_json_files_and_tolerates_missing_ones() {
    let dir = std::env::temp_dir().join(format!("board-core-load-{}", std::process::id()));
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(
        dir.join("companies.json"),
        r#"[{"id":"c1","name":"Acme","description":"Rockets"}]"#,
    )
    .await
    .unwrap();
    tokio::fs::write(
        dir.join("jobs.json"),
        r#"[{"id":"j1","title":"Dev","description":"Code","companyId":"c1"}]"#,
    )
    .await
    .unwrap();

    let store = Store::load_dir(&dir).await.unwrap();

    assert_eq!(store.companies.get("c1").await.unwrap().unwrap().name, "Acme");
    assert_eq!(store.jobs.list().await.unwrap().len(), 1);
    assert!(store.users.list().await.unwrap().is_empty());

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}
