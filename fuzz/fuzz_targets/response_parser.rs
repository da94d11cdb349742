#![no_main]

use libfuzzer_sys::fuzz_target;

use credcheck::assessment::parse;
use credcheck::prompt::Mode;

fuzz_target!(|data: &[u8]| {
    let reply = String::from_utf8_lossy(data);

    for mode in [Mode::Quick, Mode::Full] {
        let parsed = parse(&reply, mode);
        assert!(parsed.recommendations.len() <= 3);
    }
});
