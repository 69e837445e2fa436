//! Destination path layout and the completion record.

use serde::Serialize;
use uuid::Uuid;

use lakeload_core::time::DateTime;

/// Routing metadata supplied by the ingestion trigger.
///
/// Used only to compute the destination path and to fill the completion
/// record; nothing here reaches the wire as headers or query parameters.
#[derive(Clone, Debug)]
pub struct Route {
    /// Region segment of the destination path.
    pub region: String,
    /// Security level segment.
    pub security_level: String,
    /// Subject area segment.
    pub subject_area: String,
    /// Source name segment, also recorded in the completion record sender.
    pub source_name: String,
    /// Field delimiter of the source data, passed through to the catalog.
    pub delimiter: String,
    /// Ingestion type, passed through to the catalog.
    pub ingestion_type: String,
}

/// Where one batch lands: the time-sliced folder plus a generated file id.
#[derive(Clone, Debug)]
pub struct Destination {
    /// Generated file identifier.
    pub file_guid: String,
    /// Folder part of the destination, with leading and trailing `/`.
    pub folder_path: String,
    /// Full file path, `folder_path` + `file_guid`.
    pub file_path: String,
}

impl Destination {
    /// Compute the destination for `route` at `at` with a fresh v4 uuid as
    /// the file id.
    pub fn new(route: &Route, at: DateTime) -> Self {
        Self::with_file_guid(route, at, Uuid::new_v4().to_string())
    }

    /// Compute the destination with an explicit file id.
    ///
    /// Layout, preserved for downstream compatibility:
    /// `/<region>/<securityLevel>/<subjectArea>/<sourceName>/udp_year=<YYYY>/udp_month=<MM>/udp_day=<DD>/udp_hour=<HH>/udp_minute=<mm>/<fileGuid>`
    pub fn with_file_guid(route: &Route, at: DateTime, file_guid: String) -> Self {
        let time_slice = at.format("udp_year=%Y/udp_month=%m/udp_day=%d/udp_hour=%H/udp_minute=%M");
        let folder_path = format!(
            "/{}/{}/{}/{}/{}/",
            route.region, route.security_level, route.subject_area, route.source_name, time_slice
        );
        let file_path = format!("{folder_path}{file_guid}");

        Self {
            file_guid,
            folder_path,
            file_path,
        }
    }
}

/// Completion record handed to the downstream catalog queue after a batch
/// lands.
///
/// Serialized field names are the wire names the catalog consumer expects;
/// enqueueing itself happens outside this crate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogRecord {
    /// Generated file identifier.
    #[serde(rename = "dataLakeStoreFileGuid")]
    pub file_guid: String,
    /// Filesystem the batch landed in.
    #[serde(rename = "fileSystemName")]
    pub filesystem: String,
    /// Full path of the landed file.
    #[serde(rename = "dataLakeStoreFilePath")]
    pub file_path: String,
    /// `<application>-<sourceName>`.
    pub sender: String,
    /// Application name from configuration.
    pub application: String,
    /// Kind of source that produced the batch.
    #[serde(rename = "sourceType")]
    pub source_type: String,
    /// Field delimiter of the source data.
    pub delimiter: String,
    /// Ingestion type from the routing metadata.
    #[serde(rename = "ingestiontype")]
    pub ingestion_type: String,
    /// Folder part of the landed path.
    #[serde(rename = "dataLakeStoreFolderPath")]
    pub folder_path: String,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn test_route() -> Route {
        Route {
            region: "global".to_string(),
            security_level: "internal".to_string(),
            subject_area: "property".to_string(),
            source_name: "feelslike".to_string(),
            delimiter: ",".to_string(),
            ingestion_type: "stream".to_string(),
        }
    }

    #[test]
    fn test_destination_layout() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 59).unwrap();
        let dest = Destination::with_file_guid(&test_route(), at, "file-1".to_string());

        assert_eq!(
            dest.folder_path,
            "/global/internal/property/feelslike/udp_year=2024/udp_month=03/udp_day=07/udp_hour=14/udp_minute=05/"
        );
        assert_eq!(dest.file_path, format!("{}file-1", dest.folder_path));
    }

    #[test]
    fn test_generated_file_ids_are_unique() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 59).unwrap();
        let a = Destination::new(&test_route(), at);
        let b = Destination::new(&test_route(), at);

        assert_ne!(a.file_guid, b.file_guid);
        assert_eq!(a.folder_path, b.folder_path);
    }

    #[test]
    fn test_catalog_record_wire_names() {
        let record = CatalogRecord {
            file_guid: "file-1".to_string(),
            filesystem: "raw".to_string(),
            file_path: "/global/internal/property/feelslike/file-1".to_string(),
            sender: "loader-feelslike".to_string(),
            application: "loader".to_string(),
            source_type: "Event".to_string(),
            delimiter: ",".to_string(),
            ingestion_type: "stream".to_string(),
            folder_path: "/global/internal/property/feelslike/".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "dataLakeStoreFileGuid": "file-1",
                "fileSystemName": "raw",
                "dataLakeStoreFilePath": "/global/internal/property/feelslike/file-1",
                "sender": "loader-feelslike",
                "application": "loader",
                "sourceType": "Event",
                "delimiter": ",",
                "ingestiontype": "stream",
                "dataLakeStoreFolderPath": "/global/internal/property/feelslike/",
            })
        );
    }
}
