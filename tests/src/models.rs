//! Entities shared by the integration tests.
//!
//! `User` has many `Article`s and one `Profile`; `Article` belongs to its
//! author and is tagged with many `Tag`s through `articles_tags`.

use chrono::NaiveDateTime;
use quarry::{
    bail,
    stmt::{FromValue, Row, Value},
    BelongsTo, BelongsToMany, ColumnField, Entity, EntityMetadata, EntityRef, EntityState,
    HasMany, HasOne, RelationSlot, Result,
};
use std::sync::OnceLock;

#[derive(Debug, Default)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub age: Option<i64>,
    pub email: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub state: EntityState,
    pub articles: HasMany<Article>,
    pub profile: HasOne<Profile>,
}

impl User {
    pub fn new(name: &str) -> User {
        User {
            name: name.to_string(),
            ..User::default()
        }
    }
}

impl Entity for User {
    fn metadata() -> &'static EntityMetadata {
        static META: OnceLock<EntityMetadata> = OnceLock::new();
        META.get_or_init(|| {
            EntityMetadata::builder("User")
                .table("users")
                .column("id", ColumnField::primary_key())
                .column("name", ColumnField::string().required())
                .column("age", ColumnField::number())
                .column("email", ColumnField::string())
                .column("createdAt", ColumnField::created_at())
                .column("updatedAt", ColumnField::updated_at())
                .has_many("articles", EntityRef::new(Article::metadata), "author")
                .has_one("profile", EntityRef::new(Profile::metadata), "userId")
                .build()
        })
    }

    fn hydrate(mut row: Row) -> Result<Self> {
        Ok(User {
            id: row.take("id")?,
            name: row.take("name")?,
            age: row.take("age")?,
            email: row.take("email")?,
            created_at: row.take("createdAt")?,
            updated_at: row.take("updatedAt")?,
            ..User::default()
        })
    }

    fn attributes(&self) -> Row {
        Row::new()
            .set("id", self.id)
            .set("name", &self.name)
            .set("age", self.age)
            .set("email", self.email.clone())
            .set("createdAt", self.created_at)
            .set("updatedAt", self.updated_at)
    }

    fn set_attribute(&mut self, column: &str, value: Value) -> Result<()> {
        match column {
            "id" => self.id = FromValue::from_value(value)?,
            "name" => self.name = FromValue::from_value(value)?,
            "age" => self.age = FromValue::from_value(value)?,
            "email" => self.email = FromValue::from_value(value)?,
            "createdAt" => self.created_at = FromValue::from_value(value)?,
            "updatedAt" => self.updated_at = FromValue::from_value(value)?,
            _ => bail!("`User` has no column `{column}`"),
        }
        Ok(())
    }

    fn state(&self) -> &EntityState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EntityState {
        &mut self.state
    }

    fn relation_mut(&mut self, property: &str) -> Option<&mut dyn RelationSlot> {
        match property {
            "articles" => Some(&mut self.articles),
            "profile" => Some(&mut self.profile),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Article {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub title: String,
    pub state: EntityState,
    pub author: BelongsTo<User>,
    pub tags: BelongsToMany<Tag>,
}

impl Article {
    pub fn new(title: &str) -> Article {
        Article {
            title: title.to_string(),
            ..Article::default()
        }
    }
}

impl Entity for Article {
    fn metadata() -> &'static EntityMetadata {
        static META: OnceLock<EntityMetadata> = OnceLock::new();
        META.get_or_init(|| {
            EntityMetadata::builder("Article")
                .table("articles")
                .column("id", ColumnField::primary_key())
                .column("userId", ColumnField::reference())
                .column("title", ColumnField::string().required())
                .belongs_to("author", EntityRef::new(User::metadata), "articles")
                .belongs_to_many("tags", EntityRef::new(Tag::metadata), "articles")
                .build()
        })
    }

    fn hydrate(mut row: Row) -> Result<Self> {
        Ok(Article {
            id: row.take("id")?,
            user_id: row.take("userId")?,
            title: row.take("title")?,
            ..Article::default()
        })
    }

    fn attributes(&self) -> Row {
        Row::new()
            .set("id", self.id)
            .set("userId", self.user_id)
            .set("title", &self.title)
    }

    fn set_attribute(&mut self, column: &str, value: Value) -> Result<()> {
        match column {
            "id" => self.id = FromValue::from_value(value)?,
            "userId" => self.user_id = FromValue::from_value(value)?,
            "title" => self.title = FromValue::from_value(value)?,
            _ => bail!("`Article` has no column `{column}`"),
        }
        Ok(())
    }

    fn state(&self) -> &EntityState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EntityState {
        &mut self.state
    }

    fn relation_mut(&mut self, property: &str) -> Option<&mut dyn RelationSlot> {
        match property {
            "author" => Some(&mut self.author),
            "tags" => Some(&mut self.tags),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Profile {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub bio: Option<String>,
    pub state: EntityState,
}

impl Entity for Profile {
    fn metadata() -> &'static EntityMetadata {
        static META: OnceLock<EntityMetadata> = OnceLock::new();
        META.get_or_init(|| {
            EntityMetadata::builder("Profile")
                .table("profiles")
                .column("id", ColumnField::primary_key())
                .column("userId", ColumnField::reference())
                .column("bio", ColumnField::string())
                .build()
        })
    }

    fn hydrate(mut row: Row) -> Result<Self> {
        Ok(Profile {
            id: row.take("id")?,
            user_id: row.take("userId")?,
            bio: row.take("bio")?,
            ..Profile::default()
        })
    }

    fn attributes(&self) -> Row {
        Row::new()
            .set("id", self.id)
            .set("userId", self.user_id)
            .set("bio", self.bio.clone())
    }

    fn set_attribute(&mut self, column: &str, value: Value) -> Result<()> {
        match column {
            "id" => self.id = FromValue::from_value(value)?,
            "userId" => self.user_id = FromValue::from_value(value)?,
            "bio" => self.bio = FromValue::from_value(value)?,
            _ => bail!("`Profile` has no column `{column}`"),
        }
        Ok(())
    }

    fn state(&self) -> &EntityState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EntityState {
        &mut self.state
    }
}

#[derive(Debug, Default)]
pub struct Tag {
    pub id: Option<i64>,
    pub name: String,
    pub state: EntityState,
    pub articles: BelongsToMany<Article>,
}

impl Tag {
    pub fn new(name: &str) -> Tag {
        Tag {
            name: name.to_string(),
            ..Tag::default()
        }
    }
}

impl Entity for Tag {
    fn metadata() -> &'static EntityMetadata {
        static META: OnceLock<EntityMetadata> = OnceLock::new();
        META.get_or_init(|| {
            EntityMetadata::builder("Tag")
                .table("tags")
                .column("id", ColumnField::primary_key())
                .column("name", ColumnField::string().required())
                .belongs_to_many("articles", EntityRef::new(Article::metadata), "tags")
                .build()
        })
    }

    fn hydrate(mut row: Row) -> Result<Self> {
        Ok(Tag {
            id: row.take("id")?,
            name: row.take("name")?,
            ..Tag::default()
        })
    }

    fn attributes(&self) -> Row {
        Row::new().set("id", self.id).set("name", &self.name)
    }

    fn set_attribute(&mut self, column: &str, value: Value) -> Result<()> {
        match column {
            "id" => self.id = FromValue::from_value(value)?,
            "name" => self.name = FromValue::from_value(value)?,
            _ => bail!("`Tag` has no column `{column}`"),
        }
        Ok(())
    }

    fn state(&self) -> &EntityState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EntityState {
        &mut self.state
    }

    fn relation_mut(&mut self, property: &str) -> Option<&mut dyn RelationSlot> {
        match property {
            "articles" => Some(&mut self.articles),
            _ => None,
        }
    }
}
