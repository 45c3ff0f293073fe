use entity_framework::{EntityStore, FrameworkError, StoreClient, StoreEntity};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Book {
    id: String,
    title: String,
    tags: Vec<String>,
}

#[derive(Debug)]
enum BookAction {
    AddTags(Vec<String>),
    Fail,
}

#[derive(Debug, thiserror::Error)]
#[error("Book error: {0}")]
struct BookError(String);

impl StoreEntity for Book {
    type Action = BookAction;
    type ActionResult = usize;
    type Error = BookError;

    fn id(&self) -> &str {
        &self.id
    }

    fn seed() -> Vec<Self> {
        vec![book("seed-1", "Dune"), book("seed-2", "Emma")]
    }

    fn apply_replace(&mut self, incoming: Self) -> Result<(), BookError> {
        if incoming.title.is_empty() {
            return Err(BookError("empty title".into()));
        }
        self.title = incoming.title;
        self.tags = incoming.tags;
        Ok(())
    }

    fn handle_action(&mut self, action: BookAction) -> Result<usize, BookError> {
        match action {
            BookAction::AddTags(tags) => {
                self.tags.extend(tags);
                Ok(self.tags.len())
            }
            BookAction::Fail => Err(BookError("refused".into())),
        }
    }
}

fn book(id: &str, title: &str) -> Book {
    Book {
        id: id.into(),
        title: title.into(),
        tags: Vec::new(),
    }
}

fn start() -> (StoreClient<Book>, tokio::task::JoinHandle<()>) {
    let (store, client) = EntityStore::<Book>::new(10);
    let handle = tokio::spawn(store.run());
    (client, handle)
}

// --- Tests ---

#[tokio::test]
async fn test_store_full_lifecycle() {
    let (client, handle) = start();

    // 1. Insert
    client.insert(book("b1", "Ulysses")).await.unwrap();
    client.insert(book("b2", "Beloved")).await.unwrap();

    // 2. Lookup is case-insensitive and trimmed
    let found = client.get("  B1 ".into()).await.unwrap().unwrap();
    assert_eq!(found.title, "Ulysses");

    // 3. Action appends and reports the new size
    let size = client
        .perform_action("b1".into(), BookAction::AddTags(vec!["irish".into()]))
        .await
        .unwrap();
    assert_eq!(size, Some(1));

    // 4. Replace overwrites in place
    let mut edited = book("B2", "Beloved (1987)");
    edited.tags = vec!["novel".into()];
    let replaced = client.replace(edited).await.unwrap().unwrap();
    assert_eq!(replaced.id, "b2");
    assert_eq!(replaced.title, "Beloved (1987)");

    // 5. Delete
    assert!(client.delete("b1".into()).await.unwrap());
    assert!(client.get("b1".into()).await.unwrap().is_none());
    assert_eq!(client.list().await.unwrap().len(), 1);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_list_and_get_many_keep_store_order() {
    let (client, _handle) = start();
    for id in ["a", "b", "c", "d"] {
        client.insert(book(id, id)).await.unwrap();
    }

    let ids: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);

    let many = client
        .get_many(vec!["D".into(), "b".into(), "missing".into()])
        .await
        .unwrap();
    let ids: Vec<&str> = many.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "d"]);
}

#[tokio::test]
async fn test_find_filters_by_predicate() {
    let (client, _handle) = start();
    client.insert(book("1", "Middlemarch")).await.unwrap();
    client.insert(book("2", "Moby Dick")).await.unwrap();
    client.insert(book("3", "Persuasion")).await.unwrap();

    let found = client
        .find(|b: &Book| b.title.starts_with('M'))
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[1].title, "Moby Dick");
}

#[tokio::test]
async fn test_empty_store_answers_misses_without_errors() {
    let (client, _handle) = start();

    assert!(client.list().await.unwrap().is_empty());
    assert!(client.get("x".into()).await.unwrap().is_none());
    assert!(client.get_many(vec!["x".into()]).await.unwrap().is_empty());
    assert!(client.replace(book("x", "X")).await.unwrap().is_none());
    assert!(!client.delete("x".into()).await.unwrap());
    assert!(client
        .perform_action("x".into(), BookAction::AddTags(vec![]))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_insert_rejects_duplicate_and_blank_ids() {
    let (client, _handle) = start();
    client.insert(book("dup", "First")).await.unwrap();

    let duplicate = client.insert(book(" DUP", "Second")).await;
    assert!(matches!(duplicate, Err(FrameworkError::DuplicateId(_))));

    let blank = client.insert(book("   ", "Nameless")).await;
    assert!(matches!(blank, Err(FrameworkError::MissingId)));

    assert_eq!(client.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_entity_errors_are_reported() {
    let (client, _handle) = start();
    client.insert(book("e", "Emma")).await.unwrap();

    let action = client.perform_action("e".into(), BookAction::Fail).await;
    assert!(matches!(action, Err(FrameworkError::EntityError(_))));

    let replace = client.replace(book("e", "")).await;
    assert!(matches!(replace, Err(FrameworkError::EntityError(_))));

    // The record is untouched
    let current = client.get("e".into()).await.unwrap().unwrap();
    assert_eq!(current, book("e", "Emma"));
}

#[tokio::test]
async fn test_seed_if_empty_is_idempotent() {
    let (client, _handle) = start();

    assert_eq!(client.seed_if_empty().await.unwrap(), 2);
    assert_eq!(client.seed_if_empty().await.unwrap(), 0);
    assert_eq!(client.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_seed_skips_populated_store() {
    let (client, _handle) = start();
    client.insert(book("own", "Own")).await.unwrap();

    assert_eq!(client.seed_if_empty().await.unwrap(), 0);
    assert_eq!(client.list().await.unwrap(), vec![book("own", "Own")]);
}

#[tokio::test]
async fn test_closed_store_reports_error() {
    let (store, client) = EntityStore::<Book>::new(1);
    drop(store);

    let result = client.list().await;
    assert!(matches!(result, Err(FrameworkError::StoreClosed)));
}
