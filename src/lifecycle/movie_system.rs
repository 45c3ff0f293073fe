use crate::api::AppState;
use crate::config::AppConfig;
use crate::repositories::{ActorRepository, MovieRepository};
use crate::{actor_store, movie_store};
use resilience::{CircuitBreaker, ResilientExecutor};
use tracing::{error, info};

/// The runtime orchestrator for the actor and movie stores.
///
/// # Example
///
/// ```rust
/// use movies_api::config::AppConfig;
/// use movies_api::lifecycle::MovieSystem;
/// use entity_framework::EntityRepository;
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let system = MovieSystem::start(&AppConfig::default()).await?;
///
///     let actors = system.actors.get_all().await.map_err(|e| e.to_string())?;
///     assert_eq!(actors.len(), 1);
///
///     system.shutdown().await
/// }
/// ```
pub struct MovieSystem {
    pub actors: ActorRepository,
    pub movies: MovieRepository,
    /// Shared by every caller, so its breaker state spans requests
    pub executor: ResilientExecutor,

    /// Task handles for the running stores (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MovieSystem {
    /// Creates both stores, spawns them, seeds them and builds the executor.
    pub async fn start(config: &AppConfig) -> Result<Self, String> {
        let (actor_store, actor_client) = actor_store::new(config.store_channel_capacity);
        let (movie_store, movie_client) = movie_store::new(config.store_channel_capacity);

        let handles = vec![
            tokio::spawn(actor_store.run()),
            tokio::spawn(movie_store.run()),
        ];

        let seeded_actors = actor_client
            .seed_if_empty()
            .await
            .map_err(|e| format!("Seeding actors failed: {e}"))?;
        let seeded_movies = movie_client
            .seed_if_empty()
            .await
            .map_err(|e| format!("Seeding movies failed: {e}"))?;
        info!(seeded_actors, seeded_movies, "Stores seeded");

        let executor = ResilientExecutor::new(config.retry, CircuitBreaker::new(config.breaker));

        Ok(Self {
            actors: ActorRepository::new(actor_client),
            movies: MovieRepository::new(movie_client),
            executor,
            handles,
        })
    }

    /// State for the HTTP router. Its clones must be dropped before [`MovieSystem::shutdown`]
    /// can finish.
    pub fn app_state(&self) -> AppState {
        AppState {
            actors: self.actors.clone(),
            movies: self.movies.clone(),
            executor: self.executor.clone(),
        }
    }

    /// Drops the repositories and waits for both store tasks to end.
    ///
    /// Returns an error if a store task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down stores...");

        drop(self.actors);
        drop(self.movies);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Shutdown complete.");
        Ok(())
    }
}
