//! Request log records.

use std::collections::HashMap;
use std::ops::Deref;

use bson::Bson;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use podcat_mongodb::document::new_id;
use podcat_mongodb::{Collection, MongoResult};
use serde::{Deserialize, Serialize};

use crate::Model;

/// One logged API request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Model)]
pub struct Log {
    /// Identifier, assigned on create.
    #[model(json = "id", bson = "_id,omitempty")]
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// HTTP method.
    #[model(json = "method", bson = "method")]
    pub method: String,

    /// Request headers.
    #[model(json = "request_header", bson = "request_header")]
    pub request_header: HashMap<String, Vec<String>>,

    /// Raw request body.
    #[model(json = "request_body", bson = "request_body")]
    pub request_body: String,

    /// Request URL.
    #[model(json = "url", bson = "url")]
    pub url: String,

    /// Response status code.
    #[model(json = "status_code", bson = "status_code")]
    pub status_code: i32,

    /// Client address.
    #[model(json = "remote_addr", bson = "remote_addr")]
    pub remote_addr: String,

    /// Errors reported while handling the request, in any shape.
    #[model(json = "errors", bson = "errors")]
    #[serde(default)]
    pub errors: Bson,

    /// When the record was created.
    #[model(json = "creation_time", bson = "creation_time", index = "creation_time")]
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub creation_time: DateTime<Utc>,
}

/// The request log collection.
#[derive(Debug, Clone)]
pub struct LogCollection {
    collection: Collection<Log>,
}

impl LogCollection {
    /// Wrap a collection bound to the `Log` descriptor.
    pub fn new(collection: Collection<Log>) -> Self {
        Self { collection }
    }

    /// Fetch a log record by identifier.
    pub async fn log_by_id(&self, id: ObjectId) -> MongoResult<Log> {
        self.find_by_id(id).one().await
    }

    /// Assign an identifier and creation time, then insert.
    pub async fn create(&self, log: &mut Log) -> MongoResult<()> {
        log.id = Some(new_id());
        log.creation_time = Utc::now();
        self.insert(log).await
    }
}

impl Deref for LogCollection {
    type Target = Collection<Log>;

    fn deref(&self) -> &Self::Target {
        &self.collection
    }
}
