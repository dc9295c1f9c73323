//! Podcast feed records.

use std::ops::Deref;

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use podcat_model::copy_model;
use podcat_mongodb::document::new_id;
use podcat_mongodb::{Collection, FilterBuilder, MongoResult, Query};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Model;

/// Fields that [`FeedCollection::update`] never overwrites.
pub const FEED_UPDATE_IGNORED: &[&str] = &["id", "modification_time"];

/// A podcast feed and its episodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Model)]
pub struct Feed {
    /// Identifier, assigned on create.
    #[model(json = "id", bson = "_id,omitempty")]
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Feed title.
    #[model(json = "title", bson = "title", index = "title,text")]
    pub title: String,

    /// RSS feed URL.
    #[model(json = "url", bson = "url", index = ",unique")]
    pub url: String,

    /// Feed author.
    #[model(json = "author", bson = "author")]
    #[serde(default)]
    pub author: String,

    /// Channel description.
    #[model(json = "summary,omitempty", bson = "summary")]
    #[serde(default)]
    pub summary: String,

    /// Cover art URL.
    #[model(json = "image_url,omitempty", bson = "image_url")]
    #[serde(default)]
    pub image_url: String,

    /// Directory identifier, when the feed was found through the directory.
    #[model(json = "itunes_id,omitempty", bson = "itunes_id", index = "itunes_id")]
    #[serde(default)]
    pub itunes_id: Option<i64>,

    /// Directory category.
    #[model(json = "category,omitempty", bson = "category", index = "category")]
    #[serde(default)]
    pub category: String,

    /// Episodes.
    #[model(json = "items", bson = "items", nested = "Item")]
    #[serde(default)]
    pub items: Vec<Item>,

    /// Last time the stored feed changed.
    #[model(json = "modification_time", bson = "modification_time", index = "modification_time")]
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime", default)]
    pub modification_time: DateTime<Utc>,
}

/// One episode of a feed, keyed by its GUID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Model)]
pub struct Item {
    /// Globally unique identifier from the feed.
    #[model(json = "guid", bson = "guid")]
    pub guid: String,

    /// Episode title.
    #[model(json = "title", bson = "title")]
    #[serde(default)]
    pub title: String,

    /// Episode web page.
    #[model(json = "link,omitempty", bson = "link")]
    #[serde(default)]
    pub link: String,

    /// Episode description.
    #[model(json = "summary,omitempty", bson = "summary")]
    #[serde(default)]
    pub summary: String,

    /// Enclosure URL.
    #[model(json = "audio_url", bson = "audio_url")]
    #[serde(default)]
    pub audio_url: String,

    /// Duration in seconds.
    #[model(json = "duration", bson = "duration")]
    #[serde(default)]
    pub duration: i64,

    /// Enclosure size in bytes.
    #[model(json = "size", bson = "size")]
    #[serde(default)]
    pub size: i64,

    /// Publication time.
    #[model(json = "publication_time", bson = "publication_time")]
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime", default)]
    pub publication_time: DateTime<Utc>,
}

/// The feed collection.
#[derive(Debug, Clone)]
pub struct FeedCollection {
    collection: Collection<Feed>,
}

impl FeedCollection {
    /// Wrap a collection bound to the `Feed` descriptor.
    pub fn new(collection: Collection<Feed>) -> Self {
        Self { collection }
    }

    /// Fetch a feed by identifier.
    pub async fn feed_by_id(&self, id: ObjectId) -> MongoResult<Feed> {
        self.find_by_id(id).one().await
    }

    /// Fetch the feed with the given RSS URL, if stored.
    pub async fn feed_by_url(&self, url: &str) -> MongoResult<Option<Feed>> {
        let query = Query::new().filter(FilterBuilder::new().eq("url", url).build());
        self.find(Some(&query)).first().await
    }

    /// Full-text search over feed titles.
    pub async fn search(&self, text: &str, limit: i64) -> MongoResult<Vec<Feed>> {
        let query = Query::new()
            .filter(FilterBuilder::new().text_search(text).build())
            .omit(["items"])
            .limit(limit);
        self.find(Some(&query)).all().await
    }

    /// Assign an identifier and modification time, then insert.
    pub async fn create(&self, feed: &mut Feed) -> MongoResult<()> {
        feed.id = Some(new_id());
        feed.modification_time = Utc::now();
        self.insert(feed).await
    }

    /// Apply `candidate` to the stored feed, writing only if something changed.
    ///
    /// The identifier and modification time of `candidate` are ignored. Returns
    /// whether a write happened.
    pub async fn update(&self, id: ObjectId, candidate: &Feed) -> MongoResult<bool> {
        let mut current = self.feed_by_id(id).await?;
        if !copy_model(&mut current, candidate, FEED_UPDATE_IGNORED) {
            debug!(feed = %id, "Feed unchanged, skipping write");
            return Ok(false);
        }

        current.modification_time = Utc::now();
        self.replace_by_id(id, &current).await
    }
}

impl Deref for FeedCollection {
    type Target = Collection<Feed>;

    fn deref(&self) -> &Self::Target {
        &self.collection
    }
}
