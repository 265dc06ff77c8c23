//! Compact radix trie over lowercase ASCII terms.
//!
//! Each terminal node carries the inverted posting list for the term spelled
//! out by the path from the root. Non-branching chains are compressed into a
//! single edge (`label`), the classic radix/Patricia trie shape, so lookup
//! cost is proportional to term length rather than corpus vocabulary size.

use crate::error::{IndexError, Result};
use std::io::{BufRead, Write};

/// Document id assigned by the corpus collaborator.
pub type DocId = u32;

/// Number of occurrences of a term within one document.
pub type TermFreq = u32;

/// One `(document, frequency)` entry in a term's posting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_freq: TermFreq,
}

#[derive(Debug, Clone)]
struct TrieNode {
    label: String,
    /// Children kept sorted by their key character: gives the canonical
    /// pre-order serialization for free, with no separate sort pass.
    children: Vec<(char, Box<TrieNode>)>,
    terminal: bool,
    postings: Vec<Posting>,
}

impl TrieNode {
    fn new(label: String) -> Self {
        Self {
            label,
            children: Vec::new(),
            terminal: false,
            postings: Vec::new(),
        }
    }

    fn find_child(&self, ch: char) -> Option<usize> {
        self.children.binary_search_by_key(&ch, |(c, _)| *c).ok()
    }

    fn insert_child(&mut self, ch: char, node: Box<TrieNode>) {
        match self.children.binary_search_by_key(&ch, |(c, _)| *c) {
            Ok(idx) => self.children[idx] = (ch, node),
            Err(idx) => self.children.insert(idx, (ch, node)),
        }
    }
}

/// Length of the longest common prefix of two ASCII strings.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}

fn first_char(s: &str) -> char {
    s.chars().next().expect("label must be non-empty")
}

/// A radix trie mapping terms to posting lists.
#[derive(Debug, Clone)]
pub struct Trie {
    root: TrieNode,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(String::new()),
        }
    }

    /// Append a posting for `term`, splitting or creating nodes as needed.
    ///
    /// The empty string is not a valid term and is silently ignored — the
    /// root never becomes terminal.
    pub fn insert(&mut self, term: &str, doc_id: DocId, term_freq: TermFreq) {
        if term.is_empty() {
            return;
        }

        let mut node: &mut TrieNode = &mut self.root;
        let mut remaining = term;

        loop {
            let ch = first_char(remaining);
            let idx = match node.find_child(ch) {
                None => {
                    let mut leaf = TrieNode::new(remaining.to_string());
                    leaf.terminal = true;
                    leaf.postings.push(Posting { doc_id, term_freq });
                    node.insert_child(ch, Box::new(leaf));
                    return;
                }
                Some(idx) => idx,
            };

            let label_len = node.children[idx].1.label.len();
            let common = common_prefix_len(remaining, &node.children[idx].1.label);

            if common == remaining.len() && common == label_len {
                // Exact match: the term already labels this node.
                let child = &mut node.children[idx].1;
                child.terminal = true;
                child.postings.push(Posting { doc_id, term_freq });
                return;
            } else if common == remaining.len() {
                // Term is a strict prefix of the child's label: split.
                let mut old_child = std::mem::replace(
                    &mut node.children[idx].1,
                    Box::new(TrieNode::new(String::new())),
                );
                old_child.label = old_child.label[common..].to_string();
                let old_key = first_char(&old_child.label);

                let mut new_node = TrieNode::new(remaining.to_string());
                new_node.terminal = true;
                new_node.postings.push(Posting { doc_id, term_freq });
                new_node.insert_child(old_key, old_child);

                node.children[idx] = (ch, Box::new(new_node));
                return;
            } else if common == label_len {
                // Child's label is a strict prefix of the term: descend.
                remaining = &remaining[common..];
                node = &mut node.children[idx].1;
            } else {
                // Divergence: common prefix, but both sides have leftovers.
                let mut old_child = std::mem::replace(
                    &mut node.children[idx].1,
                    Box::new(TrieNode::new(String::new())),
                );
                let old_label = old_child.label.clone();
                old_child.label = old_label[common..].to_string();
                let old_key = first_char(&old_child.label);

                let new_word_part = &remaining[common..];
                let mut new_leaf = TrieNode::new(new_word_part.to_string());
                new_leaf.terminal = true;
                new_leaf.postings.push(Posting { doc_id, term_freq });
                let new_key = first_char(new_word_part);

                let mut split = TrieNode::new(old_label[..common].to_string());
                split.insert_child(old_key, old_child);
                split.insert_child(new_key, Box::new(new_leaf));

                node.children[idx] = (ch, Box::new(split));
                return;
            }
        }
    }

    /// Exact-match lookup. Returns an empty slice for unknown terms and for
    /// prefixes that do not land on a terminal node.
    pub fn lookup(&self, term: &str) -> &[Posting] {
        if term.is_empty() {
            return &[];
        }

        let mut node = &self.root;
        let mut remaining = term;

        loop {
            let ch = first_char(remaining);
            let idx = match node.find_child(ch) {
                None => return &[],
                Some(idx) => idx,
            };
            let child = &node.children[idx].1;
            let common = common_prefix_len(remaining, &child.label);

            if common == remaining.len() && common == child.label.len() {
                return if child.terminal { &child.postings } else { &[] };
            } else if common == child.label.len() && common < remaining.len() {
                remaining = &remaining[common..];
                node = child;
            } else {
                return &[];
            }
        }
    }

    /// Pre-order serialization, children emitted in ascending key-character
    /// order (already the storage order, so no sorting happens here).
    pub fn serialize<W: Write>(&self, mut writer: W) -> Result<()> {
        write_node(&self.root, &mut writer)
    }

    /// Restore a trie from its pre-order text serialization.
    ///
    /// An empty input is treated as a malformed file rather than an empty
    /// trie: a zero-byte artifact is indistinguishable from a truncated
    /// write, and a failed build must not silently behave like a valid
    /// empty index.
    pub fn deserialize<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        let root = parse_node(&mut lines)?;
        if lines.next().is_some() {
            return Err(IndexError::TrieFormat(
                "trailing data after trie root subtree".to_string(),
            ));
        }
        Ok(Self { root })
    }
}

fn write_node<W: Write>(node: &TrieNode, writer: &mut W) -> Result<()> {
    let flag = if node.terminal { '1' } else { '0' };
    let postings = node
        .postings
        .iter()
        .map(|p| format!("{},{}", p.doc_id, p.term_freq))
        .collect::<Vec<_>>()
        .join(";");
    writeln!(
        writer,
        "{}|{}|{}|{}",
        node.label,
        flag,
        node.children.len(),
        postings
    )?;
    for (_, child) in &node.children {
        write_node(child, writer)?;
    }
    Ok(())
}

fn parse_node(lines: &mut impl Iterator<Item = std::io::Result<String>>) -> Result<TrieNode> {
    let line = lines
        .next()
        .ok_or_else(|| IndexError::TrieFormat("unexpected end of trie file".to_string()))??;

    let mut fields = line.splitn(4, '|');
    let label = fields
        .next()
        .ok_or_else(|| IndexError::TrieFormat(format!("missing label field: {line:?}")))?
        .to_string();
    let flag = fields
        .next()
        .ok_or_else(|| IndexError::TrieFormat(format!("missing terminal flag: {line:?}")))?;
    let count = fields
        .next()
        .ok_or_else(|| IndexError::TrieFormat(format!("missing child count: {line:?}")))?;
    let postings_field = fields.next().unwrap_or("");

    let terminal = match flag {
        "0" => false,
        "1" => true,
        other => return Err(IndexError::TrieFormat(format!("bad terminal flag: {other:?}"))),
    };
    let child_count: usize = count
        .parse()
        .map_err(|_| IndexError::TrieFormat(format!("bad child count: {count:?}")))?;

    let postings = if postings_field.is_empty() {
        Vec::new()
    } else {
        postings_field
            .split(';')
            .map(|pair| {
                let (doc_id, freq) = pair
                    .split_once(',')
                    .ok_or_else(|| IndexError::TrieFormat(format!("bad posting: {pair:?}")))?;
                let doc_id = doc_id
                    .parse()
                    .map_err(|_| IndexError::TrieFormat(format!("bad doc id: {doc_id:?}")))?;
                let term_freq = freq
                    .parse()
                    .map_err(|_| IndexError::TrieFormat(format!("bad frequency: {freq:?}")))?;
                Ok(Posting { doc_id, term_freq })
            })
            .collect::<Result<Vec<_>>>()?
    };

    let mut node = TrieNode {
        label,
        children: Vec::new(),
        terminal,
        postings,
    };

    for _ in 0..child_count {
        let child = parse_node(lines)?;
        let key = first_char(&child.label);
        node.children.push((key, Box::new(child)));
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(postings: &[Posting]) -> Vec<(DocId, TermFreq)> {
        postings.iter().map(|p| (p.doc_id, p.term_freq)).collect()
    }

    #[test]
    fn lookup_of_unknown_term_is_empty() {
        let trie = Trie::new();
        assert!(trie.lookup("anything").is_empty());
    }

    #[test]
    fn simple_insert_and_lookup() {
        let mut trie = Trie::new();
        trie.insert("car", 1, 1);
        trie.insert("car", 2, 2);
        assert_eq!(docs(trie.lookup("car")), vec![(1, 1), (2, 2)]);
    }

    #[test]
    fn prefix_is_not_a_term_until_inserted() {
        let mut trie = Trie::new();
        trie.insert("cartoon", 2, 1);
        assert!(trie.lookup("car").is_empty());
        assert_eq!(docs(trie.lookup("cartoon")), vec![(2, 1)]);
    }

    #[test]
    fn split_when_prefix_inserted_after_longer_word() {
        let mut trie = Trie::new();
        trie.insert("cartoon", 2, 1);
        trie.insert("car", 1, 1);
        assert_eq!(docs(trie.lookup("car")), vec![(1, 1)]);
        assert_eq!(docs(trie.lookup("cartoon")), vec![(2, 1)]);
    }

    #[test]
    fn split_when_longer_word_inserted_after_prefix() {
        let mut trie = Trie::new();
        trie.insert("abc", 1, 1);
        trie.insert("abcd", 2, 1);
        assert_eq!(docs(trie.lookup("abc")), vec![(1, 1)]);
        assert_eq!(docs(trie.lookup("abcd")), vec![(2, 1)]);
    }

    #[test]
    fn classic_divergence_split() {
        let mut trie = Trie::new();
        trie.insert("computador", 1, 1);
        trie.insert("compra", 2, 1);
        assert_eq!(docs(trie.lookup("computador")), vec![(1, 1)]);
        assert_eq!(docs(trie.lookup("compra")), vec![(2, 1)]);
        assert!(trie.lookup("comp").is_empty());
    }

    #[test]
    fn triple_split_in_sequence() {
        let mut trie = Trie::new();
        trie.insert("computador", 1, 1);
        trie.insert("compra", 2, 1);
        trie.insert("comprimir", 3, 1);
        assert_eq!(docs(trie.lookup("computador")), vec![(1, 1)]);
        assert_eq!(docs(trie.lookup("compra")), vec![(2, 1)]);
        assert_eq!(docs(trie.lookup("comprimir")), vec![(3, 1)]);
    }

    #[test]
    fn identical_term_appends_to_posting_list() {
        let mut trie = Trie::new();
        trie.insert("casa", 1, 5);
        trie.insert("casa", 5, 2);
        assert_eq!(docs(trie.lookup("casa")), vec![(1, 5), (5, 2)]);
    }

    #[test]
    fn divergent_and_non_terminal_lookups_fail() {
        let mut trie = Trie::new();
        trie.insert("computador", 1, 1);
        assert!(trie.lookup("compra").is_empty());
        assert!(trie.lookup("comp").is_empty());
    }

    #[test]
    fn empty_term_is_ignored() {
        let mut trie = Trie::new();
        trie.insert("", 1, 1);
        assert!(trie.lookup("").is_empty());
        assert!(!trie.root.terminal);
    }

    #[test]
    fn serialize_deserialize_round_trip() {
        let mut trie = Trie::new();
        for (term, doc_id, freq) in [
            ("car", 1, 1),
            ("car", 2, 2),
            ("cartoon", 2, 1),
            ("house", 1, 1),
            ("house", 3, 2),
            ("computador", 1, 1),
            ("compra", 2, 1),
        ] {
            trie.insert(term, doc_id, freq);
        }

        let mut buf = Vec::new();
        trie.serialize(&mut buf).unwrap();

        let restored = Trie::deserialize(buf.as_slice()).unwrap();
        for term in ["car", "cartoon", "house", "computador", "compra"] {
            assert_eq!(docs(trie.lookup(term)), docs(restored.lookup(term)));
        }

        let mut buf2 = Vec::new();
        restored.serialize(&mut buf2).unwrap();
        assert_eq!(buf, buf2, "serialization must be canonical");
    }

    #[test]
    fn deserialize_rejects_empty_input() {
        let err = Trie::deserialize(&b""[..]);
        assert!(err.is_err());
    }

    #[test]
    fn deserialize_rejects_malformed_line() {
        let err = Trie::deserialize(&b"not-enough-fields\n"[..]);
        assert!(err.is_err());
    }

    #[test]
    fn deserialize_rejects_trailing_data() {
        // A root declaring zero children, followed by a stray line.
        let input = b"|0|0|\nstray|0|0|\n";
        let err = Trie::deserialize(&input[..]);
        assert!(err.is_err());
    }
}
