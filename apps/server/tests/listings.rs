mod common;

use common::{body_json, spawn_app, TestApp};

const SEED: &str = r#"
INSERT INTO brokers (id, name, logo_url, description, tags, asset_types, affiliate_url,
    country, country_code, year_established, featured, video_url, min_deposit,
    deposit_fee, withdrawal_fee, inactivity_fee, leverage, regulation)
VALUES
    ('alpha', 'Alpha FX', '/a.png', 'A', '["ecn"]', '["forex"]', 'https://a',
     'Cyprus', 'CY', 2010, 0, NULL, 50, 'None', 'None', '$10/month', '1:500', 'CySEC'),
    ('bravo', 'Bravo Markets', '/b.png', 'B', '["market-maker"]', '["forex","crypto"]', 'https://b',
     'Australia', 'AU', 2005, 1, NULL, 0, 'None', '$5', 'None', '1:30', 'ASIC'),
    ('charlie', 'Charlie Trade', '/c.png', 'C', '["ecn"]', '["stocks"]', 'https://c',
     'Cyprus', 'CY', 2018, 0, NULL, 100, '1%', 'None', 'None', '1:100', 'CySEC'),
    ('delta', 'Delta Prime', '/d.png', 'D', '["stp"]', '["forex"]', 'https://d',
     'United Kingdom', 'GB', 1999, 0, NULL, 25, 'None', 'None', 'None', '1:30', 'FCA'),
    ('echo', 'Echo Capital', '/e.png', 'E', '["ecn"]', '["forex"]', 'https://e',
     'Seychelles', 'SC', 2015, 1, NULL, 1000, 'None', 'None', 'None', '1:1000', 'FSA');

INSERT INTO prop_firms (id, name, logo_url, description, tags, asset_types, affiliate_url,
    country, country_code, year_established, featured, video_url, challenge_type,
    challenge_fee, challenge_fee_refundable, phase1_profit_target, phase2_profit_target,
    max_funding, profit_split, scaled_profit_split, max_daily_drawdown, max_total_drawdown,
    drawdown_type, min_trading_days, max_trading_days, payout_frequency, ea_allowed,
    news_trading_allowed, weekend_holding_allowed, copy_trading_allowed, swap_free,
    consistency_rule)
VALUES
    ('fund-one', 'Fund One', '/1.png', '1', '["mt5"]', '["forex"]', 'https://1',
     'United States', 'US', 2021, 0, NULL, '2-step', 99, 1, 8, 5, 200000, 80, 90, 5, 10,
     'static', 4, NULL, 'bi-weekly', 1, 1, 0, 0, 1, 0),
    ('fund-two', 'Fund Two', '/2.png', '2', '["mt5"]', '["forex","crypto"]', 'https://2',
     'United Kingdom', 'GB', 2019, 1, NULL, 'instant', 250, 0, 10, NULL, 100000, 70, NULL, 4, 8,
     'trailing', 0, 30, 'monthly', 0, 1, 1, 1, 0, 1),
    ('fund-three', 'Fund Three', '/3.png', '3', '["mt5"]', '["stocks"]', 'https://3',
     'Czech Republic', 'CZ', 2015, 0, NULL, '1-step', 155, 1, 10, NULL, 400000, 60, NULL, 5, 10,
     'static', 3, NULL, 'monthly', 1, 0, 1, 0, 0, 0);
"#;

async fn seeded_app() -> TestApp {
    let app = spawn_app().await;
    app.execute_sql(SEED);
    app
}

fn ids(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn forex_brokers_in_smallest_deposit_bucket() {
    let app = seeded_app().await;
    let response = app
        .get("/api/v1/brokers?assetTypes=forex&minDepositRanges=0-50")
        .await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    let mut found = ids(&body);
    // Featured first; the rest is shuffled.
    assert_eq!(found[0], "bravo");
    found[1..].sort();
    assert_eq!(found, vec!["bravo", "alpha", "delta"]);
    for row in body.as_array().unwrap() {
        assert!(row["assetTypes"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("forex")));
        assert!(row["minDeposit"].as_f64().unwrap() <= 50.0);
    }
}

#[tokio::test]
async fn featured_brokers_lead_every_ordering() {
    let app = seeded_app().await;
    for uri in [
        "/api/v1/brokers",
        "/api/v1/brokers?sortBy=name&sortOrder=desc",
        "/api/v1/brokers?sortBy=minDeposit",
        "/api/v1/brokers?sortBy=yearEstablished&sortOrder=desc",
    ] {
        let body = body_json(app.get(uri).await).await;
        let featured: Vec<bool> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["featured"].as_bool().unwrap())
            .collect();
        assert_eq!(featured.len(), 5, "{}", uri);
        assert_eq!(featured, vec![true, true, false, false, false], "{}", uri);
    }
}

#[tokio::test]
async fn explicit_sort_is_deterministic() {
    let app = seeded_app().await;
    let body = body_json(app.get("/api/v1/brokers?sortBy=minDeposit&sortOrder=asc").await).await;
    assert_eq!(
        ids(&body),
        vec!["bravo", "echo", "delta", "alpha", "charlie"]
    );
}

#[tokio::test]
async fn unknown_filter_values_are_rejected() {
    let app = seeded_app().await;
    for uri in [
        "/api/v1/brokers?assetTypes=bonds",
        "/api/v1/brokers?minDepositRanges=10-20",
        "/api/v1/brokers?sortBy=rating",
        "/api/v1/prop-firms?profitSplitMin=lots",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), 400, "{}", uri);
        let body = body_json(response).await;
        assert_eq!(body["code"], 400);
        assert!(!body["message"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn prop_firms_with_profit_split_floor() {
    let app = seeded_app().await;
    let body = body_json(app.get("/api/v1/prop-firms?profitSplitMin=70").await).await;
    assert_eq!(ids(&body), vec!["fund-two", "fund-one"]);

    let body = body_json(
        app.get("/api/v1/prop-firms?swapFree=true&newsTrading=true")
            .await,
    )
    .await;
    assert_eq!(ids(&body), vec!["fund-one"]);
}

#[tokio::test]
async fn get_by_id_and_missing() {
    let app = seeded_app().await;
    let response = app.get("/api/v1/brokers/delta").await;
    assert_eq!(response.status(), 200);
    assert_eq!(body_json(response).await["name"], "Delta Prime");

    assert_eq!(app.get("/api/v1/brokers/zulu").await.status(), 404);
    assert_eq!(app.get("/api/v1/prop-firms/fund-three").await.status(), 200);
    assert_eq!(app.get("/api/v1/prop-firms/zulu").await.status(), 404);
}

#[tokio::test]
async fn filter_options_reflect_table_contents() {
    let app = seeded_app().await;
    let body = body_json(app.get("/api/v1/brokers/filters").await).await;
    assert_eq!(
        body["assetTypes"],
        serde_json::json!(["crypto", "forex", "stocks"])
    );
    assert_eq!(
        body["countries"],
        serde_json::json!(["Australia", "Cyprus", "Seychelles", "United Kingdom"])
    );
    assert!(body.get("challengeTypes").is_none());

    let body = body_json(app.get("/api/v1/prop-firms/filters").await).await;
    assert_eq!(
        body["challengeTypes"],
        serde_json::json!(["1-step", "2-step", "instant"])
    );
    assert_eq!(
        body["payoutFrequencies"],
        serde_json::json!(["bi-weekly", "monthly"])
    );
}

#[tokio::test]
async fn empty_tables_answer_empty_lists() {
    let app = spawn_app().await;
    let body = body_json(app.get("/api/v1/brokers").await).await;
    assert_eq!(body, serde_json::json!([]));
}
