#![no_main]

use fontcol_backend_c::Table;
use fontcol_spec::GlyphFormat;
use libfuzzer_sys::fuzz_target;

// Readers and table building must return errors, never panic.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let formats = GlyphFormat::all();
    let format = formats[selector as usize % formats.len()];

    if let Ok(parsed) = fontcol_descriptor::parse(format, text) {
        for (_, glyph) in parsed.value.iter() {
            let _ = glyph.columns();
            let _ = glyph.preview();
        }
        let _ = Table::build(&parsed.value);
    }
});
