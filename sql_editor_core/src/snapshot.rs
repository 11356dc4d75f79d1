//! Editor snapshot for deterministic replay testing

use crate::Position;
#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Complete editor state snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct EditorSnapshot {
    pub cursor: Position,
    pub buffer_lines: Vec<String>,
    pub dirty: bool,
}

impl EditorSnapshot {
    /// Compute a deterministic hash of the snapshot state
    /// This is used for fast comparison in replay tests
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();

        hasher.update(self.cursor.row.to_le_bytes());
        hasher.update(self.cursor.col.to_le_bytes());

        for line in &self.buffer_lines {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }

        hasher.update([self.dirty as u8]);

        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        u64::from_le_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditorConfig, Key, SqlEditor};

    fn replay(text: &str) -> EditorSnapshot {
        let mut editor = SqlEditor::new(EditorConfig::default()).unwrap();
        for key in Key::typed(text) {
            editor.apply_key(key);
        }
        editor.snapshot()
    }

    #[test]
    fn test_snapshot_hash_deterministic() {
        let script = "SELECT name\nFROM users\nWHERE id IN (1, 2";
        assert_eq!(replay(script).hash(), replay(script).hash());
    }

    #[test]
    fn test_snapshot_hash_different_for_different_state() {
        let snapshot1 = EditorSnapshot {
            cursor: Position::new(0, 0),
            buffer_lines: vec!["hello".into()],
            dirty: false,
        };
        let snapshot2 = EditorSnapshot {
            cursor: Position::new(0, 1),
            ..snapshot1.clone()
        };

        assert_ne!(snapshot1.hash(), snapshot2.hash());
    }

    #[test]
    fn test_replay_layout() {
        let snapshot = replay("SELECT name\nFROM users\nWHERE id IN (1, 2");
        assert_eq!(
            snapshot.buffer_lines,
            vec![
                "SELECT name".to_string(),
                "  FROM users".to_string(),
                "    WHERE id IN (1, 2)".to_string(),
            ]
        );
    }
}
