use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

mod common;
use common::utils::{fixture, seed_fixtures, spawn_app, spawn_app_with};

use football_fixtures::db::{FixtureStore, StoreError};
use football_fixtures::models::fixture::{Fixture, FixtureRecord, League, PageWindow, Season};
use football_fixtures::services::{CacheError, InMemoryQueryCache, QueryCache};

const LEAGUE_ERROR: &str = "Valid leagues are: Premier League or Bundesliga.";
const SEASON_ERROR: &str = "Valid seasons are: 2018-2019 or 2017-2018.";
const PARAMS_ERROR: &str = "Invalid or missing parameters.";

async fn get_fixtures(address: &str, query: &[(&str, &str)]) -> reqwest::Response {
    Client::new()
        .get(&format!("{}/fixtures", address))
        .query(query)
        .send()
        .await
        .expect("Failed to execute request.")
}

async fn error_message(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Cannot turn into a json.");
    body["error"].as_str().expect("No error in response").to_string()
}

#[tokio::test]
async fn valid_league_and_season_return_a_list() {
    let app = spawn_app().await;
    seed_fixtures(&*app.store).await;

    let response = get_fixtures(&app.address, &[("league", "Premier League"), ("season", "2018-2019")]).await;

    assert_eq!(response.status().as_u16(), 200);
    let fixtures: Vec<Fixture> = response.json().await.expect("Cannot parse fixtures.");
    assert_eq!(fixtures.len(), 5);
    assert!(fixtures.iter().all(|f| f.league == "Premier League" && f.season == "2018-2019"));
}

#[tokio::test]
async fn empty_store_returns_an_empty_list() {
    let app = spawn_app().await;

    let response = get_fixtures(&app.address, &[("league", "Bundesliga"), ("season", "2017-2018")]).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "[]");
}

#[tokio::test]
async fn invalid_league_returns_400() {
    let app = spawn_app().await;

    for query in [
        vec![("league", "Invalid League"), ("season", "2018-2019")],
        vec![("season", "2018-2019")],
        vec![("league", "premier league"), ("season", "2018-2019")],
    ] {
        let response = get_fixtures(&app.address, &query).await;
        assert_eq!(response.status().as_u16(), 400, "query {:?}", query);
        assert_eq!(error_message(response).await, LEAGUE_ERROR);
    }
}

#[tokio::test]
async fn invalid_season_returns_400() {
    let app = spawn_app().await;

    for query in [
        vec![("league", "Premier League"), ("season", "Invalid Season")],
        vec![("league", "Bundesliga")],
    ] {
        let response = get_fixtures(&app.address, &query).await;
        assert_eq!(response.status().as_u16(), 400, "query {:?}", query);
        assert_eq!(error_message(response).await, SEASON_ERROR);
    }
}

#[tokio::test]
async fn invalid_pagination_returns_400() {
    let app = spawn_app().await;

    for (name, value) in [
        ("limit", "0"),
        ("limit", "-5"),
        ("limit", "abc"),
        ("limit", ""),
        ("page", "0"),
        ("page", "-1"),
        ("page", "two"),
    ] {
        let response = get_fixtures(
            &app.address,
            &[("league", "Premier League"), ("season", "2018-2019"), (name, value)],
        )
        .await;
        assert_eq!(response.status().as_u16(), 400, "{}={:?}", name, value);
        assert_eq!(error_message(response).await, PARAMS_ERROR);
    }
}

#[tokio::test]
async fn league_is_checked_before_season_and_pagination() {
    let app = spawn_app().await;

    let response = get_fixtures(
        &app.address,
        &[("league", "Serie A"), ("season", "1999-2000"), ("limit", "0")],
    )
    .await;
    assert_eq!(error_message(response).await, LEAGUE_ERROR);

    let response = get_fixtures(
        &app.address,
        &[("league", "Bundesliga"), ("season", "1999-2000"), ("limit", "0")],
    )
    .await;
    assert_eq!(error_message(response).await, SEASON_ERROR);
}

#[tokio::test]
async fn repeated_query_is_served_from_cache_even_after_data_changes() {
    let app = spawn_app().await;
    seed_fixtures(&*app.store).await;
    let query = [("league", "Premier League"), ("season", "2018-2019"), ("limit", "10")];

    let first = get_fixtures(&app.address, &query).await;
    assert_eq!(first.headers()["x-cache"], "MISS");
    let first = first.text().await.unwrap();

    app.store
        .upsert(&fixture(League::PremierLeague, Season::Season2018_2019, "12/08/2018", "Watford", "Brighton"))
        .await
        .unwrap();

    let second = get_fixtures(&app.address, &query).await;
    assert_eq!(second.headers()["x-cache"], "HIT");
    let second = second.text().await.unwrap();

    assert_eq!(first, second);
    let fixtures: Vec<Fixture> = serde_json::from_str(&second).unwrap();
    assert_eq!(fixtures.len(), 5);
}

#[tokio::test]
async fn parameter_order_is_part_of_the_cache_key() {
    let app = spawn_app().await;
    seed_fixtures(&*app.store).await;

    get_fixtures(&app.address, &[("league", "Premier League"), ("season", "2018-2019")]).await;
    let reordered = get_fixtures(&app.address, &[("season", "2018-2019"), ("league", "Premier League")]).await;

    assert_eq!(reordered.headers()["x-cache"], "MISS");
    assert_eq!(app.cache.len().await, 2);
}

#[tokio::test]
async fn consecutive_pages_match_one_larger_page() {
    let app = spawn_app().await;
    seed_fixtures(&*app.store).await;
    let base = [("league", "Premier League"), ("season", "2018-2019")];

    let page = |limit: &'static str, page: &'static str| {
        let mut query = base.to_vec();
        query.push(("limit", limit));
        query.push(("page", page));
        query
    };

    let first: Vec<Fixture> = get_fixtures(&app.address, &page("2", "1")).await.json().await.unwrap();
    let second: Vec<Fixture> = get_fixtures(&app.address, &page("2", "2")).await.json().await.unwrap();
    let all: Vec<Fixture> = get_fixtures(&app.address, &page("4", "1")).await.json().await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert!(first.iter().all(|f| !second.contains(f)));
    assert_eq!([first, second].concat(), all);

    let past_the_end: Vec<Fixture> = get_fixtures(&app.address, &page("4", "3")).await.json().await.unwrap();
    assert!(past_the_end.is_empty());
}

#[tokio::test]
async fn default_page_size_is_fifteen() {
    let app = spawn_app().await;
    for i in 0..20 {
        app.store
            .upsert(&fixture(
                League::Bundesliga,
                Season::Season2017_2018,
                "18/08/2017",
                &format!("Home {}", i),
                "Away",
            ))
            .await
            .unwrap();
    }

    let fixtures: Vec<Fixture> = get_fixtures(&app.address, &[("league", "Bundesliga"), ("season", "2017-2018")])
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fixtures.len(), 15);

    let rest: Vec<Fixture> = get_fixtures(
        &app.address,
        &[("league", "Bundesliga"), ("season", "2017-2018"), ("page", "2")],
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(rest.len(), 5);
}

struct UnreachableStore;

#[async_trait]
impl FixtureStore for UnreachableStore {
    async fn find_page(&self, _: League, _: Season, _: PageWindow) -> Result<Vec<Fixture>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn upsert(&self, _: &FixtureRecord) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn count(&self, _: League, _: Season) -> Result<i64, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn close(&self) {}
}

#[tokio::test]
async fn store_failure_returns_500() {
    let address = spawn_app_with(Arc::new(UnreachableStore), Arc::new(InMemoryQueryCache::new())).await;

    let response = get_fixtures(&address, &[("league", "Premier League"), ("season", "2018-2019")]).await;

    assert_eq!(response.status().as_u16(), 500);
}

struct DownCache;

#[async_trait]
impl QueryCache for DownCache {
    async fn get(&self, _: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Redis(redis::RedisError::from((redis::ErrorKind::IoError, "Connection refused"))))
    }

    async fn set(&self, _: &str, _: &str) -> Result<(), CacheError> {
        Err(CacheError::Redis(redis::RedisError::from((redis::ErrorKind::IoError, "Connection refused"))))
    }
}

#[tokio::test]
async fn cache_failure_returns_500() {
    let store = Arc::new(football_fixtures::db::InMemoryFixtureStore::default());
    seed_fixtures(&*store).await;
    let address = spawn_app_with(store, Arc::new(DownCache)).await;

    let response = get_fixtures(&address, &[("league", "Premier League"), ("season", "2018-2019")]).await;

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(error_message(response).await, "Internal server error.");
}
