//! Binary morphology regression test
//!
//! Checks the algebraic properties of brick morphology on a synthetic
//! page of "words", and runs the textline-solidifying sequence.
//!
//! # See also
//!
//! C Leptonica: `reference/leptonica/prog/binmorph1_reg.c`, `morphseq_reg.c`

use leptonica_core::{Pix, PixelDepth};
use leptonica_morph::{
    Sel, close_safe_brick, dilate, dilate_brick, erode, erode_brick, morph_sequence, open_brick,
};
use leptonica_test::RegParams;

const WIDTH: u32 = 21;
const HEIGHT: u32 = 15;

/// Rows of small rectangles, like words on a page.
fn make_word_page() -> Pix {
    let mut pm = Pix::new(300, 200, PixelDepth::Bit1).unwrap().to_mut();
    for row in 0..6u32 {
        let y = 15 + row * 30;
        let mut x = 10 + (row * 7) % 13;
        while x + 20 < 290 {
            let wlen = 12 + (x * 3 + row) % 17;
            pm.set_region(x, y, wlen, 9);
            x += wlen + 5;
        }
    }
    pm.into()
}

fn is_subset(a: &Pix, b: &Pix) -> bool {
    a.data().iter().zip(b.data()).all(|(&wa, &wb)| wa & !wb == 0)
}

#[test]
fn binmorph_reg_properties() {
    let mut rp = RegParams::new("binmorph");
    let pixs = make_word_page();
    let orig = pixs.count_pixels().unwrap();

    let dilated = dilate_brick(&pixs, WIDTH, HEIGHT).unwrap();
    let eroded = erode_brick(&pixs, WIDTH, HEIGHT).unwrap();
    rp.compare_values(1.0, is_subset(&pixs, &dilated) as u8 as f64, 0.0);
    rp.compare_values(1.0, is_subset(&eroded, &pixs) as u8 as f64, 0.0);
    rp.compare_values(1.0, (dilated.count_pixels().unwrap() >= orig) as u8 as f64, 0.0);

    // Opening is anti-extensive and idempotent
    let opened = open_brick(&pixs, 5, 5).unwrap();
    rp.compare_values(1.0, is_subset(&opened, &pixs) as u8 as f64, 0.0);
    let opened2 = open_brick(&opened, 5, 5).unwrap();
    rp.compare_pix(&opened, &opened2);

    // Safe closing is extensive and idempotent
    let closed = close_safe_brick(&pixs, WIDTH, 1).unwrap();
    rp.compare_values(1.0, is_subset(&pixs, &closed) as u8 as f64, 0.0);
    let closed2 = close_safe_brick(&closed, WIDTH, 1).unwrap();
    rp.compare_pix(&closed, &closed2);

    // SEL-based and brick operations agree
    let sel = Sel::create_brick(WIDTH, HEIGHT).unwrap();
    rp.compare_pix(&dilated, &dilate(&pixs, &sel).unwrap());
    rp.compare_pix(&eroded, &erode(&pixs, &sel).unwrap());

    assert!(rp.cleanup(), "binmorph regression test failed");
}

#[test]
fn binmorph_reg_textline_sequence() {
    let mut rp = RegParams::new("binmorph_seq");
    let pixs = make_word_page();

    // Words joined into one solid band per row
    let pixd = morph_sequence(&pixs, "o1.3 + c15.1 + o15.1 + c40.1").unwrap();
    for row in 0..6u32 {
        let y = 15 + row * 30 + 4;
        let first = (0..300).find(|&x| pixd.get_pixel(x, y) == Some(1));
        let last = (0..300).rev().find(|&x| pixd.get_pixel(x, y) == Some(1));
        let (Some(first), Some(last)) = (first, last) else {
            rp.compare_values(1.0, 0.0, 0.0);
            continue;
        };
        let solid = (first..=last).all(|x| pixd.get_pixel(x, y) == Some(1));
        rp.compare_values(1.0, solid as u8 as f64, 0.0);
    }
    // Gaps between rows are preserved
    rp.compare_values(0.0, pixd.get_pixel(150, 15 + 9 + 8).unwrap_or(1) as f64, 0.0);

    assert!(rp.cleanup(), "binmorph_seq regression test failed");
}
