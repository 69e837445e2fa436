use anyhow::Result;
use lakeload_adls::{Config, Ingestor, Route};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let _ = env_logger::builder().is_test(true).try_init();

    // Credentials from StorageAccountName / StorageAccountKey / Application.
    let config = Config::default().from_env();
    if config.account_name.is_none() || config.account_key.is_none() {
        println!("Set StorageAccountName and StorageAccountKey to run this example");
        return Ok(());
    }

    let ingestor = Ingestor::new(&config)?;

    let route = Route {
        region: "global".to_string(),
        security_level: "internal".to_string(),
        subject_area: "property".to_string(),
        source_name: "feelslike".to_string(),
        delimiter: ",".to_string(),
        ingestion_type: "stream".to_string(),
    };

    let records = vec![
        json!({"device": "sensor-1", "temp": 21.5}),
        json!({"device": "sensor-2", "temp": 19.0}),
    ];

    let landed = ingestor.ingest(&route, &records).await?;
    println!("landed {} records at {}", records.len(), landed.file_path);
    println!(
        "completion record: {}",
        serde_json::to_string_pretty(&landed)?
    );

    Ok(())
}
