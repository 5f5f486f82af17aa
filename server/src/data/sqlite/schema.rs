//! SQLite schema definitions
//!
//! Created idempotently at startup. CHECK constraints mirror the validation
//! rules of the player service so a bad row cannot be written by any path.

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Players
-- =============================================================================
CREATE TABLE IF NOT EXISTS players (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 12),
    title TEXT NOT NULL CHECK(length(title) >= 1 AND length(title) <= 30),
    race TEXT NOT NULL CHECK(race IN ('HUMAN', 'DWARF', 'ELF', 'GIANT', 'ORC', 'TROLL', 'HOBBIT')),
    profession TEXT NOT NULL CHECK(profession IN (
        'WARRIOR', 'ROGUE', 'SORCERER', 'CLERIC', 'PALADIN', 'NAZGUL', 'WARLOCK', 'DRUID'
    )),
    birthday INTEGER NOT NULL CHECK(birthday >= 0),
    banned INTEGER NOT NULL DEFAULT 0 CHECK(banned IN (0, 1)),
    experience INTEGER NOT NULL CHECK(experience >= 0 AND experience <= 10000000),
    level INTEGER NOT NULL CHECK(level >= 0),
    until_next_level INTEGER NOT NULL CHECK(until_next_level >= 0),
    version INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_players_name ON players(name);
CREATE INDEX IF NOT EXISTS idx_players_experience ON players(experience);
CREATE INDEX IF NOT EXISTS idx_players_birthday ON players(birthday);
CREATE INDEX IF NOT EXISTS idx_players_level ON players(level);
"#;
