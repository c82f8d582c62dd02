use fastcheck_fmmseg::delimiter_set::{is_ignorable, is_space};
use fastcheck_fmmseg::dictionary_lib::DictionaryError;
use fastcheck_fmmseg::utils::MAX_ENTRY_LEN;
use fastcheck_fmmseg::FastCheck;

const DIRTY: &str = include_str!("dicts/dirty.txt");

fn dirty_checker(ignore_case: bool) -> FastCheck {
    let fc = FastCheck::new(ignore_case);
    fc.load_words(DIRTY.as_bytes()).unwrap();
    fc
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn load_words_test() {
        let fc = dirty_checker(true);
        assert_eq!(fc.len(), 16);
        assert!(fc.contains("BADASS"));
        assert!(fc.contains("son of a gun"));
        assert!(!fc.contains(""));
    }

    #[test]
    fn every_entry_is_found_test() {
        let fc = dirty_checker(true);
        for line in DIRTY.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let (found, ok) = fc.has_word(line, None);
            assert!(ok, "has_word missed {:?}", line);
            assert!(line.starts_with(&found), "{:?} is not a prefix of {:?}", found, line);

            let replaced = fc.replace(line, '*', None);
            assert_ne!(replaced, line, "replace left {:?} untouched", line);
            assert_eq!(replaced.chars().count(), line.chars().count());
        }
    }

    #[test]
    fn round_trip_test() {
        let fc = FastCheck::new(false);
        assert!(fc.insert("badword").unwrap());
        assert_eq!(fc.has_word("badword", None), ("badword".to_string(), true));
        assert_eq!(fc.replace("badword", '*', None), "*******");
    }

    #[test]
    fn idempotent_insert_test() {
        let fc = FastCheck::new(true);
        assert!(fc.insert("badword").unwrap());
        let before = fc.find("a BADWORD and a badword", None);
        assert!(!fc.insert("BadWord").unwrap());
        assert_eq!(fc.len(), 1);
        assert_eq!(fc.find("a BADWORD and a badword", None), before);
    }

    #[test]
    fn empty_insert_test() {
        let fc = FastCheck::new(false);
        assert!(!fc.insert("").unwrap());
        assert!(fc.is_empty());
    }

    #[test]
    fn oversized_insert_test() {
        let fc = FastCheck::new(false);
        let huge = "z".repeat(MAX_ENTRY_LEN + 1);
        match fc.insert(&huge) {
            Err(DictionaryError::EntryTooLong { len, max }) => {
                assert_eq!(len, MAX_ENTRY_LEN + 1);
                assert_eq!(max, MAX_ENTRY_LEN);
            }
            other => panic!("expected EntryTooLong, got {:?}", other),
        }
        assert!(fc.is_empty());
        assert_eq!(fc.has_word(&huge, None), (String::new(), false));
    }

    #[test]
    fn case_insensitive_keeps_original_spelling_test() {
        let fc = FastCheck::new(true);
        fc.insert("BadWord").unwrap();
        assert_eq!(
            fc.has_word("this has badword in it", None),
            ("badword".to_string(), true)
        );
        assert_eq!(
            fc.find("BADWORD, badWord and bAdWoRd", None),
            vec!["BADWORD", "badWord", "bAdWoRd"]
        );
    }

    #[test]
    fn case_sensitive_test() {
        let fc = FastCheck::new(false);
        fc.insert("BadWord").unwrap();
        assert!(!fc.has_word("badword", None).1);
        assert!(fc.has_word("BadWord", None).1);
    }

    #[test]
    fn whitelist_veto_test() {
        let fc = FastCheck::new(false);
        fc.insert("ass").unwrap();
        fc.insert("asshole").unwrap();
        fc.add_whitelist(["ass"]);

        assert!(!fc.has_word("ass", None).1);
        assert_eq!(fc.has_word("asshole", None), ("asshole".to_string(), true));
        assert_eq!(fc.replace("you ass, you asshole", '*', None), "you ass, you *******");
    }

    #[test]
    fn whitelist_is_normalized_test() {
        let fc = FastCheck::new(true);
        fc.insert("Scunthorpe").unwrap();
        fc.add_whitelist(vec!["scunthorpe".to_string()]);
        assert!(fc.find("SCUNTHORPE united", None).is_empty());
    }

    #[test]
    fn skip_predicate_test() {
        let fc = FastCheck::new(false);
        fc.insert("badword").unwrap();
        assert_eq!(
            fc.has_word("b a d w o r d", Some(&is_space)),
            ("badword".to_string(), true)
        );
        assert_eq!(
            fc.replace("b a d w o r d", '*', Some(&is_space)),
            "* * * * * * *"
        );
        assert!(!fc.has_word("b a d w o r d", None).1);
    }

    #[test]
    fn punctuation_skip_test() {
        let fc = FastCheck::new(true);
        fc.insert("垃圾").unwrap();
        fc.insert("fuck").unwrap();
        let text = "你好啊, f.u.c.k you ! ～你就是个,垃.圾 哈 哈";
        assert_eq!(fc.find(text, Some(&is_ignorable)), vec!["fuck", "垃圾"]);
        assert_eq!(
            fc.replace(text, '⛤', Some(&is_ignorable)),
            "你好啊, ⛤.⛤.⛤.⛤ you ! ～你就是个,⛤.⛤ 哈 哈"
        );
    }

    #[test]
    fn custom_closure_skip_test() {
        let fc = FastCheck::new(false);
        fc.insert("spam").unwrap();
        let dashes = |c: char| c == '-';
        assert_eq!(fc.find("s-p-a-m and spam", Some(&dashes)), vec!["spam", "spam"]);
    }

    #[test]
    fn no_false_negatives_within_bound_test() {
        let words = ["badword", "damn", "crap", "垃圾", "son of a gun", "abcdefghijklmno"];
        let fc = FastCheck::new(false);
        for w in words {
            fc.insert(w).unwrap();
        }
        let noise = ["", "x", "bad ", "dada", "cr", "垃", "so ", "abcdefg", "  "];
        for w in words {
            for before in noise {
                for after in noise {
                    let text = format!("{before}{w}{after}");
                    let found = fc.find(&text, None);
                    assert!(found.iter().any(|f| f == w), "{:?} not found in {:?}", w, text);
                }
            }
        }
    }

    #[test]
    fn non_overlap_test() {
        let fc = FastCheck::new(false);
        for w in ["abc", "bcd", "cde", "b", "de"] {
            fc.insert(w).unwrap();
        }
        let text = "abcdeabcdebcdbde";
        let found = fc.find(text, None);
        let total: usize = found.iter().map(|f| f.chars().count()).sum();
        let masked = fc.replace(text, '#', None);
        assert_eq!(masked.chars().filter(|&c| c == '#').count(), total);
    }

    #[test]
    fn single_char_entries_test() {
        let fc = FastCheck::new(false);
        fc.insert("操").unwrap();
        assert_eq!(fc.find("操操x操", None), vec!["操", "操", "操"]);
        assert_eq!(fc.replace("操", '*', None), "*");
        fc.add_whitelist(["操"]);
        assert!(fc.find("操操x操", None).is_empty());
    }

    #[test]
    fn long_entry_test() {
        let fc = dirty_checker(true);
        let text = "It's Supercalifragilisticexpialidocious, said Mary.";
        assert_eq!(
            fc.find(text, None),
            vec!["Supercalifragilisticexpialidocious"]
        );
    }

    #[test]
    fn find_empty_is_vec_test() {
        let fc = dirty_checker(false);
        let found: Vec<String> = fc.find("clean text", None);
        assert!(found.is_empty());
        assert_eq!(fc.replace("", '*', None), "");
    }

    #[test]
    fn multiline_replace_test() {
        let fc = dirty_checker(true);
        let text = "Curse Words – what the heck.\n来直播间在线观看激情小姐姐\n";
        let out = fc.replace(text, '⭑', None);
        assert_eq!(out, "Curse Words – what the ⭑⭑⭑⭑.\n来直播间在线观看⭑⭑⭑⭑姐\n");
        assert_eq!(fc.find(text, None), vec!["heck", "激情小姐"]);
    }

    #[test]
    fn batch_matches_sequential_test() {
        let texts = [
            "This is a test text with badword and anotherbadword.",
            "damn, that's crappy",
            "nothing",
            "傻瓜和笨蛋",
        ];
        let mut fc = dirty_checker(true);
        let expected_find: Vec<Vec<String>> = texts.iter().map(|t| fc.find(t, None)).collect();
        let expected_replace: Vec<String> = texts.iter().map(|t| fc.replace(t, '*', None)).collect();

        assert!(fc.get_parallel());
        assert_eq!(fc.find_batch(&texts, None), expected_find);
        assert_eq!(fc.replace_batch(&texts, '*', None), expected_replace);

        fc.set_parallel(false);
        assert_eq!(fc.find_batch(&texts, None), expected_find);
        assert_eq!(fc.replace_batch(&texts, '*', None), expected_replace);
    }

    #[test]
    fn concurrent_readers_and_writer_test() {
        let fc = Arc::new(FastCheck::new(true));
        fc.insert("badword").unwrap();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let fc = Arc::clone(&fc);
                thread::spawn(move || {
                    for _ in 0..200 {
                        assert!(fc.has_word("some BADWORD here", None).1);
                    }
                })
            })
            .collect();

        let writer = {
            let fc = Arc::clone(&fc);
            thread::spawn(move || {
                for i in 0..200 {
                    fc.insert(&format!("word{i}")).unwrap();
                }
            })
        };

        for r in readers {
            r.join().unwrap();
        }
        writer.join().unwrap();
        assert_eq!(fc.len(), 201);
        assert!(fc.contains("word199"));
        // "word4" is an entry too and is confirmed before "word42" is reached.
        let found: HashSet<String> = fc.find("word7 word42 badword", None).into_iter().collect();
        assert!(found.contains("word7") && found.contains("word4") && found.contains("badword"));
    }
}
