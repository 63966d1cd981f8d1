use crate::domain::model::Address;

pub fn full_address(address: &Address) -> String {
    format!("{}{}{}", address.line1, address.line2, address.line3)
}

/// 服務回傳的是半形片假名，顯示時轉成全形
pub fn full_kana(address: &Address) -> String {
    to_full_width_katakana(&format!(
        "{}{}{}",
        address.kana1, address.kana2, address.kana3
    ))
}

// U+FF61..=U+FF9F
const HALF_WIDTH_TABLE: [char; 63] = [
    '。', '「', '」', '、', '・', 'ヲ', 'ァ', 'ィ', 'ゥ', 'ェ', 'ォ', 'ャ', 'ュ', 'ョ', 'ッ', 'ー',
    'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ', 'タ',
    'チ', 'ツ', 'テ', 'ト', 'ナ', 'ニ', 'ヌ', 'ネ', 'ノ', 'ハ', 'ヒ', 'フ', 'ヘ', 'ホ', 'マ', 'ミ',
    'ム', 'メ', 'モ', 'ヤ', 'ユ', 'ヨ', 'ラ', 'リ', 'ル', 'レ', 'ロ', 'ワ', 'ン', '゛', '゜',
];

const DAKUTEN: char = '\u{FF9E}';
const HANDAKUTEN: char = '\u{FF9F}';

fn widen(c: char) -> char {
    match c as u32 {
        0xFF61..=0xFF9F => HALF_WIDTH_TABLE[(c as u32 - 0xFF61) as usize],
        _ => c,
    }
}

fn voiced(base: char) -> Option<char> {
    match base {
        'ウ' => Some('ヴ'),
        // カ..ト and ハ..ホ: the voiced form is the next code point
        'カ' | 'キ' | 'ク' | 'ケ' | 'コ' | 'サ' | 'シ' | 'ス' | 'セ' | 'ソ' | 'タ' | 'チ' | 'ツ'
        | 'テ' | 'ト' | 'ハ' | 'ヒ' | 'フ' | 'ヘ' | 'ホ' => char::from_u32(base as u32 + 1),
        _ => None,
    }
}

fn semi_voiced(base: char) -> Option<char> {
    match base {
        'ハ' | 'ヒ' | 'フ' | 'ヘ' | 'ホ' => char::from_u32(base as u32 + 2),
        _ => None,
    }
}

pub fn to_full_width_katakana(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        let wide = widen(c);
        let combined = match chars.peek() {
            Some(&DAKUTEN) => voiced(wide),
            Some(&HANDAKUTEN) => semi_voiced(wide),
            _ => None,
        };

        match combined {
            Some(composed) => {
                chars.next();
                out.push(composed);
            }
            None => out.push(wide),
        }
    }

    out
}
