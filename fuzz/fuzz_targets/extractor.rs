#![no_main]

use libfuzzer_sys::fuzz_target;

use credcheck::extractor::{MAX_ARTICLE_CHARS, extract};

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);

    let article = extract(&html);
    assert!(article.char_len() <= MAX_ARTICLE_CHARS + 3);
});
