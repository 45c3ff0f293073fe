use entity_framework::EntityRepository;
use movies_api::actor_store::ActorError;
use movies_api::config::AppConfig;
use movies_api::lifecycle::MovieSystem;
use movies_api::model::{Actor, Movie, SEED_ACTOR_ID, SEED_MOVIE_ID};
use movies_api::movie_store::MovieError;

async fn start() -> MovieSystem {
    MovieSystem::start(&AppConfig::default())
        .await
        .expect("system starts")
}

#[tokio::test]
async fn test_seeded_records_link_each_other() {
    let system = start().await;

    let actors = system.actors.get_all().await.unwrap();
    let movies = system.movies.get_all().await.unwrap();
    assert_eq!(actors, vec![Actor::seed()]);
    assert_eq!(movies, vec![Movie::seed()]);

    assert_eq!(actors[0].filmography, vec![SEED_MOVIE_ID]);
    assert_eq!(movies[0].starring_actor, vec![SEED_ACTOR_ID]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_actor_lifecycle() {
    let system = start().await;

    // 1. Insert and read back
    let mut actor = Actor::new("a-100", "Morgan", "Freeman");
    actor.birth_day = Some("06-01-1937".into());
    system.actors.insert(actor.clone()).await.unwrap();
    assert_eq!(
        system.actors.get_by_id(" A-100 ").await.unwrap(),
        Some(actor.clone())
    );

    // 2. Natural-key lookup ignores case and padding
    let found = system.actors.find_by_name(" tim ", "ROBBINS").await.unwrap();
    assert_eq!(found.map(|a| a.id), Some(SEED_ACTOR_ID.to_string()));

    // 3. Same name under a new id is refused
    let duplicate = system
        .actors
        .insert(Actor::new("a-101", "morgan", "FREEMAN"))
        .await;
    assert!(matches!(duplicate, Err(ActorError::AlreadyExists(_))));

    // 4. Replace keeps the id and overwrites the rest
    let mut edited = actor.clone();
    edited.birth_day = None;
    let replaced = system.actors.replace(edited).await.unwrap().unwrap();
    assert_eq!(replaced.birth_day, None);

    // 5. Delete shrinks the collection by one
    assert!(system.actors.delete("a-100").await.unwrap());
    assert!(!system.actors.delete("a-100").await.unwrap());
    assert_eq!(system.actors.get_all().await.unwrap().len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_links_append_in_order_without_dedup() {
    let system = start().await;
    system
        .movies
        .insert(Movie::new("m-2", "Mystic River", "2003"))
        .await
        .unwrap();

    assert!(system
        .actors
        .link_movies(SEED_ACTOR_ID, vec!["m-2".into(), SEED_MOVIE_ID.into()])
        .await
        .unwrap());

    let actor = system.actors.get_by_id(SEED_ACTOR_ID).await.unwrap().unwrap();
    assert_eq!(actor.filmography, vec![SEED_MOVIE_ID, "m-2", SEED_MOVIE_ID]);

    // The other side of the relation is untouched
    let movie = system.movies.get_by_id("m-2").await.unwrap().unwrap();
    assert!(movie.starring_actor.is_empty());

    assert!(!system
        .movies
        .link_actors("missing", vec![SEED_ACTOR_ID.into()])
        .await
        .unwrap());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_movie_title_is_unique() {
    let system = start().await;

    let duplicate = system
        .movies
        .insert(Movie::new("m-9", "  the shawshank REDEMPTION", "1994"))
        .await;
    assert!(matches!(duplicate, Err(MovieError::AlreadyExists(_))));

    let same_id = system
        .movies
        .insert(Movie::new(SEED_MOVIE_ID, "Another Title", "2001"))
        .await;
    assert!(matches!(same_id, Err(MovieError::AlreadyExists(_))));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_collection_reads_through_executor() {
    let system = start().await;

    let movies = system
        .executor
        .execute(|| system.movies.get_all())
        .await
        .unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(system.executor.breaker().failure_count().await, 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_waits_for_released_state() {
    let system = start().await;
    let state = system.app_state();
    drop(state);

    system.shutdown().await.unwrap();
}
