//! Typed note and book payloads, and batch decryption.
//!
//! Encrypted and decrypted forms are distinct types: `content` and `label`
//! on the encrypted side are base64 AEAD payloads, and nothing downstream
//! can mistake them for plaintext.
//!
//! Batch decryption is partial-failure tolerant. A fetched page of notes may
//! contain one corrupt record (bad sync, truncated upload, key rotation gone
//! wrong); that record is annotated with an error and rendered as such, while
//! the rest of the page stays usable.

use serde::{Deserialize, Serialize};

use crate::crypto::{self, KEY_LEN};
use crate::error::CryptoError;

/// A book as returned by the server: the label is ciphertext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedBook {
    pub uuid: String,
    /// base64([nonce || ciphertext || tag]) of the book label.
    pub label: String,
}

/// A note as returned by the server: content and book label are ciphertext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedNote {
    pub uuid: String,
    /// base64([nonce || ciphertext || tag]) of the note body.
    pub content: String,
    pub book: EncryptedBook,
    pub added_on: i64,
    pub edited_on: i64,
    pub public: bool,
}

/// A book with its label decrypted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptedBook {
    pub uuid: String,
    pub label: String,
}

/// A note with content and book label decrypted.
///
/// `error` is set (and the plaintext fields left empty) when the note could
/// not be decrypted during a batch fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptedNote {
    pub uuid: String,
    pub content: String,
    pub book: DecryptedBook,
    pub added_on: i64,
    pub edited_on: i64,
    pub public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Decrypts a single note's content and book label. All other fields pass
/// through unchanged.
pub fn decrypt_note(key: &[u8; KEY_LEN], note: &EncryptedNote) -> Result<DecryptedNote, CryptoError> {
    let content = crypto::decrypt_string(key, &note.content)?;
    let label = crypto::decrypt_string(key, &note.book.label)?;
    Ok(DecryptedNote {
        uuid: note.uuid.clone(),
        content,
        book: DecryptedBook {
            uuid: note.book.uuid.clone(),
            label,
        },
        added_on: note.added_on,
        edited_on: note.edited_on,
        public: note.public,
        error: None,
    })
}

/// Decrypts a batch of fetched notes.
///
/// Failures are caught per note: the failing note comes back with empty
/// plaintext fields and `error` set, and the rest of the batch is unaffected.
pub fn decrypt_notes(key: &[u8; KEY_LEN], notes: &[EncryptedNote]) -> Vec<DecryptedNote> {
    notes
        .iter()
        .map(|note| match decrypt_note(key, note) {
            Ok(decrypted) => decrypted,
            Err(e) => {
                tracing::warn!("failed to decrypt note {}: {e}", note.uuid);
                DecryptedNote {
                    uuid: note.uuid.clone(),
                    content: String::new(),
                    book: DecryptedBook {
                        uuid: note.book.uuid.clone(),
                        label: String::new(),
                    },
                    added_on: note.added_on,
                    edited_on: note.edited_on,
                    public: note.public,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect()
}

/// Decrypts a single book label.
pub fn decrypt_book(key: &[u8; KEY_LEN], book: &EncryptedBook) -> Result<DecryptedBook, CryptoError> {
    Ok(DecryptedBook {
        uuid: book.uuid.clone(),
        label: crypto::decrypt_string(key, &book.label)?,
    })
}

/// Decrypts a book listing with the same per-item failure policy as
/// [`decrypt_notes`]: an undecryptable label becomes an empty string.
pub fn decrypt_books(key: &[u8; KEY_LEN], books: &[EncryptedBook]) -> Vec<DecryptedBook> {
    books
        .iter()
        .map(|book| match decrypt_book(key, book) {
            Ok(decrypted) => decrypted,
            Err(e) => {
                tracing::warn!("failed to decrypt book {}: {e}", book.uuid);
                DecryptedBook {
                    uuid: book.uuid.clone(),
                    label: String::new(),
                }
            }
        })
        .collect()
}

/// Encrypts a note's content and book label for upload.
/// Returns (encrypted_content, encrypted_label), both base64.
pub fn encrypt_note_fields(
    key: &[u8; KEY_LEN],
    content: &str,
    label: &str,
) -> Result<(String, String), CryptoError> {
    let enc_content = crypto::encrypt_string(key, content)?;
    let enc_label = crypto::encrypt_string(key, label)?;
    Ok((enc_content, enc_label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encrypted_note(key: &[u8; KEY_LEN], uuid: &str, content: &str, label: &str) -> EncryptedNote {
        let (content, label) = encrypt_note_fields(key, content, label).unwrap();
        EncryptedNote {
            uuid: uuid.to_string(),
            content,
            book: EncryptedBook {
                uuid: format!("book-{uuid}"),
                label,
            },
            added_on: 1_700_000_000,
            edited_on: 1_700_000_100,
            public: false,
        }
    }

    #[test]
    fn note_roundtrip() {
        let key = crypto::generate_key().unwrap();
        let note = encrypted_note(&key, "n1", "buy milk\nand bread", "groceries");
        let decrypted = decrypt_note(&key, &note).unwrap();
        assert_eq!(decrypted.content, "buy milk\nand bread");
        assert_eq!(decrypted.book.label, "groceries");
        assert_eq!(decrypted.added_on, note.added_on);
        assert!(decrypted.error.is_none());
    }

    #[test]
    fn corrupt_note_does_not_abort_batch() {
        let key = crypto::generate_key().unwrap();
        let good = encrypted_note(&key, "n1", "first", "book");
        let mut bad = encrypted_note(&key, "n2", "second", "book");
        bad.content = "AAAA".to_string(); // too short to even hold a nonce
        let also_good = encrypted_note(&key, "n3", "third", "book");

        let decrypted = decrypt_notes(&key, &[good, bad, also_good]);
        assert_eq!(decrypted.len(), 3);
        assert_eq!(decrypted[0].content, "first");
        assert!(decrypted[1].error.is_some());
        assert!(decrypted[1].content.is_empty());
        assert_eq!(decrypted[2].content, "third");
    }

    #[test]
    fn bad_label_flags_the_note() {
        let key = crypto::generate_key().unwrap();
        let mut note = encrypted_note(&key, "n1", "content", "label");
        note.book.label = crypto::encrypt_string(&crypto::generate_key().unwrap(), "label").unwrap();
        let decrypted = decrypt_notes(&key, &[note]);
        assert!(decrypted[0].error.is_some());
    }
}
