use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{IndexOptions, ReturnDocument},
    Client, Collection, Database, IndexModel,
};

use crate::dbs::mongo::models::MongoThought;
use crate::error::Result;

#[derive(Clone)]
pub struct MongoThoughtRepository {
    database: Database,
    collection: Collection<MongoThought>,
}

impl MongoThoughtRepository {
    pub fn new(client: &Client, db_name: &str, collection: &str) -> Self {
        let database = client.database(db_name);
        let collection = database.collection(collection);
        Self {
            database,
            collection,
        }
    }

    /// Create the sort index, and the unique content index when requested
    pub async fn ensure_indexes(&self, unique_content: bool) -> Result<()> {
        let created_at = IndexModel::builder()
            .keys(doc! { "created_at": -1, "_id": -1 })
            .build();
        self.collection.create_index(created_at).await?;

        if unique_content {
            let content = IndexModel::builder()
                .keys(doc! { "content": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build();
            self.collection.create_index(content).await?;
        }

        Ok(())
    }

    pub async fn insert(&self, thought: MongoThought) -> Result<MongoThought> {
        self.collection.insert_one(&thought).await?;
        Ok(thought)
    }

    /// One page ordered by `created_at`, `_id` breaking ties
    pub async fn find_page(&self, order: i32, skip: u64, limit: i64) -> Result<Vec<MongoThought>> {
        let thoughts = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": order, "_id": order })
            .skip(skip)
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(thoughts)
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<MongoThought>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// `$set` the content fields, returning the updated document
    pub async fn update_content(
        &self,
        id: ObjectId,
        content: String,
        secondary_text: Option<String>,
    ) -> Result<Option<MongoThought>> {
        let mut fields = doc! { "content": content };
        if let Some(text) = secondary_text {
            fields.insert("secondary_text", text);
        }

        self.find_and_update(id, doc! { "$set": fields }).await
    }

    /// `$inc` the counter server-side, returning the updated document
    pub async fn increment_resonance(&self, id: ObjectId) -> Result<Option<MongoThought>> {
        self.find_and_update(id, doc! { "$inc": { "resonance_count": 1_i64 } })
            .await
    }

    pub async fn delete(&self, id: ObjectId) -> Result<Option<MongoThought>> {
        Ok(self.collection.find_one_and_delete(doc! { "_id": id }).await?)
    }

    pub async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn find_and_update(&self, id: ObjectId, update: Document) -> Result<Option<MongoThought>> {
        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?)
    }
}
