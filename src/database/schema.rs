// Table definitions, applied in order by DatabaseManager::migrate.
// Every statement must stay idempotent.

pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        username    TEXT NOT NULL UNIQUE,
        email       TEXT NOT NULL UNIQUE,
        password    TEXT NOT NULL,
        bio         TEXT,
        image       TEXT,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS userprofile (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id  INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS followers_assoc (
        follower     INTEGER NOT NULL REFERENCES userprofile(id) ON DELETE CASCADE,
        followed_by  INTEGER NOT NULL REFERENCES userprofile(id) ON DELETE CASCADE,
        PRIMARY KEY (follower, followed_by)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS article (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        slug         TEXT NOT NULL UNIQUE,
        title        TEXT NOT NULL,
        description  TEXT NOT NULL,
        body         TEXT NOT NULL,
        created_at   TEXT NOT NULL,
        updated_at   TEXT NOT NULL,
        author_id    INTEGER NOT NULL REFERENCES userprofile(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tags (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        tagname  TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tag_assoc (
        tag      INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
        article  INTEGER NOT NULL REFERENCES article(id) ON DELETE CASCADE,
        PRIMARY KEY (tag, article)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS favoritor_assoc (
        favoriter          INTEGER NOT NULL REFERENCES userprofile(id) ON DELETE CASCADE,
        favorited_article  INTEGER NOT NULL REFERENCES article(id) ON DELETE CASCADE,
        PRIMARY KEY (favoriter, favorited_article)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comment (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        body        TEXT NOT NULL,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL,
        author_id   INTEGER NOT NULL REFERENCES userprofile(id) ON DELETE CASCADE,
        article_id  INTEGER NOT NULL REFERENCES article(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_article_author ON article(author_id)",
    "CREATE INDEX IF NOT EXISTS idx_article_created ON article(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_comment_article ON comment(article_id)",
];
