//! Arabic contextual forms and mandatory ligatures.
//!
//! An Arabic letter takes up to four shapes depending on its position
//! in a word. Unicode assigns a presentation-form codepoint to each
//! shape; the tables below map the Arabic block (U+0600..U+06FF),
//! indexed by the low byte, to those forms. Codepoints without a
//! distinct shape map to themselves.

/// Initial forms.
pub(super) const INIT: [u32; 256] = [
    0x0600, 0x0601, 0x0602, 0x0603, 0x0604, 0x0605, 0x0606, 0x0607, //
    0x0608, 0x0609, 0x060a, 0x060b, 0x060c, 0x060d, 0x060e, 0x060f, //
    0x0610, 0x0611, 0x0612, 0x0613, 0x0614, 0x0615, 0x0616, 0x0617, //
    0x0618, 0x0619, 0x061a, 0x061b, 0x061c, 0x061d, 0x061e, 0x061f, //
    0x0620, 0x0621, 0x0622, 0x0623, 0x0624, 0x0625, 0xfe8b, 0x0627, //
    0xfe91, 0x0629, 0xfe97, 0xfe9b, 0xfe9f, 0xfea3, 0xfea7, 0x062f, //
    0x0630, 0x0631, 0x0632, 0xfeb3, 0xfeb7, 0xfebb, 0xfebf, 0xfec3, //
    0xfec7, 0xfecb, 0xfecf, 0x063b, 0x063c, 0x063d, 0x063e, 0x063f, //
    0x0640, 0xfed3, 0xfed7, 0xfedb, 0xfedf, 0xfee3, 0xfee7, 0xfeeb, //
    0x0648, 0x0649, 0xfef3, 0x064b, 0x064c, 0x064d, 0x064e, 0x064f, //
    0x0650, 0x0651, 0x0652, 0x0653, 0x0654, 0x0655, 0x0656, 0x0657, //
    0x0658, 0x0659, 0x065a, 0x065b, 0x065c, 0x065d, 0x065e, 0x065f, //
    0x0660, 0x0661, 0x0662, 0x0663, 0x0664, 0x0665, 0x0666, 0x0667, //
    0x0668, 0x0669, 0x066a, 0x066b, 0x066c, 0x066d, 0x066e, 0x066f, //
    0x0670, 0x0671, 0x0672, 0x0673, 0x0674, 0x0675, 0x0676, 0x0677, //
    0x0678, 0xfb68, 0xfb60, 0xfb54, 0x067c, 0x067d, 0xfb58, 0xfb64, //
    0xfb5c, 0x0681, 0x0682, 0xfb78, 0xfb74, 0x0685, 0xfb7c, 0xfb80, //
    0x0688, 0x0689, 0x068a, 0x068b, 0x068c, 0x068d, 0x068e, 0x068f, //
    0x0690, 0x0691, 0x0692, 0x0693, 0x0694, 0x0695, 0x0696, 0x0697, //
    0x0698, 0x0699, 0x069a, 0x069b, 0x069c, 0x069d, 0x069e, 0x069f, //
    0x06a0, 0x06a1, 0x06a2, 0x06a3, 0xfb6c, 0x06a5, 0xfb70, 0x06a7, //
    0x06a8, 0xfb90, 0x06aa, 0x06ab, 0x06ac, 0xfbd5, 0x06ae, 0xfb94, //
    0x06b0, 0xfb9c, 0x06b2, 0xfb98, 0x06b4, 0x06b5, 0x06b6, 0x06b7, //
    0x06b8, 0x06b9, 0x06ba, 0xfba2, 0x06bc, 0x06bd, 0xfbac, 0x06bf, //
    0x06c0, 0xfba8, 0x06c2, 0x06c3, 0x06c4, 0x06c5, 0x06c6, 0x06c7, //
    0x06c8, 0x06c9, 0x06ca, 0x06cb, 0xfbfe, 0x06cd, 0x06ce, 0x06cf, //
    0xfbe6, 0x06d1, 0x06d2, 0x06d3, 0x06d4, 0x06d5, 0x06d6, 0x06d7, //
    0x06d8, 0x06d9, 0x06da, 0x06db, 0x06dc, 0x06dd, 0x06de, 0x06df, //
    0x06e0, 0x06e1, 0x06e2, 0x06e3, 0x06e4, 0x06e5, 0x06e6, 0x06e7, //
    0x06e8, 0x06e9, 0x06ea, 0x06eb, 0x06ec, 0x06ed, 0x06ee, 0x06ef, //
    0x06f0, 0x06f1, 0x06f2, 0x06f3, 0x06f4, 0x06f5, 0x06f6, 0x06f7, //
    0x06f8, 0x06f9, 0x06fa, 0x06fb, 0x06fc, 0x06fd, 0x06fe, 0x06ff, //
];

/// Medial forms.
pub(super) const MEDI: [u32; 256] = [
    0x0600, 0x0601, 0x0602, 0x0603, 0x0604, 0x0605, 0x0606, 0x0607, //
    0x0608, 0x0609, 0x060a, 0x060b, 0x060c, 0x060d, 0x060e, 0x060f, //
    0x0610, 0x0611, 0x0612, 0x0613, 0x0614, 0x0615, 0x0616, 0x0617, //
    0x0618, 0x0619, 0x061a, 0x061b, 0x061c, 0x061d, 0x061e, 0x061f, //
    0x0620, 0x0621, 0x0622, 0x0623, 0x0624, 0x0625, 0xfe8c, 0x0627, //
    0xfe92, 0x0629, 0xfe98, 0xfe9c, 0xfea0, 0xfea4, 0xfea8, 0x062f, //
    0x0630, 0x0631, 0x0632, 0xfeb4, 0xfeb8, 0xfebc, 0xfec0, 0xfec4, //
    0xfec8, 0xfecc, 0xfed0, 0x063b, 0x063c, 0x063d, 0x063e, 0x063f, //
    0x0640, 0xfed4, 0xfed8, 0xfedc, 0xfee0, 0xfee4, 0xfee8, 0xfeec, //
    0x0648, 0x0649, 0xfef4, 0x064b, 0x064c, 0x064d, 0x064e, 0x064f, //
    0x0650, 0x0651, 0x0652, 0x0653, 0x0654, 0x0655, 0x0656, 0x0657, //
    0x0658, 0x0659, 0x065a, 0x065b, 0x065c, 0x065d, 0x065e, 0x065f, //
    0x0660, 0x0661, 0x0662, 0x0663, 0x0664, 0x0665, 0x0666, 0x0667, //
    0x0668, 0x0669, 0x066a, 0x066b, 0x066c, 0x066d, 0x066e, 0x066f, //
    0x0670, 0x0671, 0x0672, 0x0673, 0x0674, 0x0675, 0x0676, 0x0677, //
    0x0678, 0xfb69, 0xfb61, 0xfb55, 0x067c, 0x067d, 0xfb59, 0xfb65, //
    0xfb5d, 0x0681, 0x0682, 0xfb79, 0xfb75, 0x0685, 0xfb7d, 0xfb81, //
    0x0688, 0x0689, 0x068a, 0x068b, 0x068c, 0x068d, 0x068e, 0x068f, //
    0x0690, 0x0691, 0x0692, 0x0693, 0x0694, 0x0695, 0x0696, 0x0697, //
    0x0698, 0x0699, 0x069a, 0x069b, 0x069c, 0x069d, 0x069e, 0x069f, //
    0x06a0, 0x06a1, 0x06a2, 0x06a3, 0xfb6d, 0x06a5, 0xfb71, 0x06a7, //
    0x06a8, 0xfb91, 0x06aa, 0x06ab, 0x06ac, 0xfbd6, 0x06ae, 0xfb95, //
    0x06b0, 0xfb9d, 0x06b2, 0xfb99, 0x06b4, 0x06b5, 0x06b6, 0x06b7, //
    0x06b8, 0x06b9, 0x06ba, 0xfba3, 0x06bc, 0x06bd, 0xfbad, 0x06bf, //
    0x06c0, 0xfba9, 0x06c2, 0x06c3, 0x06c4, 0x06c5, 0x06c6, 0x06c7, //
    0x06c8, 0x06c9, 0x06ca, 0x06cb, 0xfbff, 0x06cd, 0x06ce, 0x06cf, //
    0xfbe7, 0x06d1, 0x06d2, 0x06d3, 0x06d4, 0x06d5, 0x06d6, 0x06d7, //
    0x06d8, 0x06d9, 0x06da, 0x06db, 0x06dc, 0x06dd, 0x06de, 0x06df, //
    0x06e0, 0x06e1, 0x06e2, 0x06e3, 0x06e4, 0x06e5, 0x06e6, 0x06e7, //
    0x06e8, 0x06e9, 0x06ea, 0x06eb, 0x06ec, 0x06ed, 0x06ee, 0x06ef, //
    0x06f0, 0x06f1, 0x06f2, 0x06f3, 0x06f4, 0x06f5, 0x06f6, 0x06f7, //
    0x06f8, 0x06f9, 0x06fa, 0x06fb, 0x06fc, 0x06fd, 0x06fe, 0x06ff, //
];

/// Final forms.
pub(super) const FINA: [u32; 256] = [
    0x0600, 0x0601, 0x0602, 0x0603, 0x0604, 0x0605, 0x0606, 0x0607, //
    0x0608, 0x0609, 0x060a, 0x060b, 0x060c, 0x060d, 0x060e, 0x060f, //
    0x0610, 0x0611, 0x0612, 0x0613, 0x0614, 0x0615, 0x0616, 0x0617, //
    0x0618, 0x0619, 0x061a, 0x061b, 0x061c, 0x061d, 0x061e, 0x061f, //
    0x0620, 0x0621, 0xfe82, 0xfe84, 0xfe86, 0xfe88, 0xfe8a, 0xfe8e, //
    0xfe90, 0xfe94, 0xfe96, 0xfe9a, 0xfe9e, 0xfea2, 0xfea6, 0xfeaa, //
    0xfeac, 0xfeae, 0xfeb0, 0xfeb2, 0xfeb6, 0xfeba, 0xfebe, 0xfec2, //
    0xfec6, 0xfeca, 0xfece, 0x063b, 0x063c, 0x063d, 0x063e, 0x063f, //
    0x0640, 0xfed2, 0xfed6, 0xfeda, 0xfede, 0xfee2, 0xfee6, 0xfeea, //
    0xfeee, 0xfef0, 0xfef2, 0x064b, 0x064c, 0x064d, 0x064e, 0x064f, //
    0x0650, 0x0651, 0x0652, 0x0653, 0x0654, 0x0655, 0x0656, 0x0657, //
    0x0658, 0x0659, 0x065a, 0x065b, 0x065c, 0x065d, 0x065e, 0x065f, //
    0x0660, 0x0661, 0x0662, 0x0663, 0x0664, 0x0665, 0x0666, 0x0667, //
    0x0668, 0x0669, 0x066a, 0x066b, 0x066c, 0x066d, 0x066e, 0x066f, //
    0x0670, 0xfb51, 0x0672, 0x0673, 0x0674, 0x0675, 0x0676, 0x0677, //
    0x0678, 0xfb67, 0xfb5f, 0xfb53, 0x067c, 0x067d, 0xfb57, 0xfb63, //
    0xfb5b, 0x0681, 0x0682, 0xfb77, 0xfb73, 0x0685, 0xfb7b, 0xfb7f, //
    0xfb89, 0x0689, 0x068a, 0x068b, 0xfb85, 0xfb83, 0xfb87, 0x068f, //
    0x0690, 0xfb8d, 0x0692, 0x0693, 0x0694, 0x0695, 0x0696, 0x0697, //
    0xfb8b, 0x0699, 0x069a, 0x069b, 0x069c, 0x069d, 0x069e, 0x069f, //
    0x06a0, 0x06a1, 0x06a2, 0x06a3, 0xfb6b, 0x06a5, 0xfb6f, 0x06a7, //
    0x06a8, 0xfb8f, 0x06aa, 0x06ab, 0x06ac, 0xfbd4, 0x06ae, 0xfb93, //
    0x06b0, 0xfb9b, 0x06b2, 0xfb97, 0x06b4, 0x06b5, 0x06b6, 0x06b7, //
    0x06b8, 0x06b9, 0xfb9f, 0xfba1, 0x06bc, 0x06bd, 0xfbab, 0x06bf, //
    0xfba5, 0xfba7, 0x06c2, 0x06c3, 0x06c4, 0xfbe1, 0xfbda, 0xfbd8, //
    0xfbdc, 0xfbe3, 0x06ca, 0xfbdf, 0xfbfd, 0x06cd, 0x06ce, 0x06cf, //
    0xfbe5, 0x06d1, 0xfbaf, 0xfbb1, 0x06d4, 0x06d5, 0x06d6, 0x06d7, //
    0x06d8, 0x06d9, 0x06da, 0x06db, 0x06dc, 0x06dd, 0x06de, 0x06df, //
    0x06e0, 0x06e1, 0x06e2, 0x06e3, 0x06e4, 0x06e5, 0x06e6, 0x06e7, //
    0x06e8, 0x06e9, 0x06ea, 0x06eb, 0x06ec, 0x06ed, 0x06ee, 0x06ef, //
    0x06f0, 0x06f1, 0x06f2, 0x06f3, 0x06f4, 0x06f5, 0x06f6, 0x06f7, //
    0x06f8, 0x06f9, 0x06fa, 0x06fb, 0x06fc, 0x06fd, 0x06fe, 0x06ff, //
];

/// Isolated forms.
pub(super) const ISOL: [u32; 256] = [
    0x0600, 0x0601, 0x0602, 0x0603, 0x0604, 0x0605, 0x0606, 0x0607, //
    0x0608, 0x0609, 0x060a, 0x060b, 0x060c, 0x060d, 0x060e, 0x060f, //
    0x0610, 0x0611, 0x0612, 0x0613, 0x0614, 0x0615, 0x0616, 0x0617, //
    0x0618, 0x0619, 0x061a, 0x061b, 0x061c, 0x061d, 0x061e, 0x061f, //
    0x0620, 0xfe80, 0xfe81, 0xfe83, 0xfe85, 0xfe87, 0xfe89, 0xfe8d, //
    0xfe8f, 0xfe93, 0xfe95, 0xfe99, 0xfe9d, 0xfea1, 0xfea5, 0xfea9, //
    0xfeab, 0xfead, 0xfeaf, 0xfeb1, 0xfeb5, 0xfeb9, 0xfebd, 0xfec1, //
    0xfec5, 0xfec9, 0xfecd, 0x063b, 0x063c, 0x063d, 0x063e, 0x063f, //
    0x0640, 0xfed1, 0xfed5, 0xfed9, 0xfedd, 0xfee1, 0xfee5, 0xfee9, //
    0xfeed, 0xfeef, 0xfef1, 0x064b, 0x064c, 0x064d, 0x064e, 0x064f, //
    0x0650, 0x0651, 0x0652, 0x0653, 0x0654, 0x0655, 0x0656, 0x0657, //
    0x0658, 0x0659, 0x065a, 0x065b, 0x065c, 0x065d, 0x065e, 0x065f, //
    0x0660, 0x0661, 0x0662, 0x0663, 0x0664, 0x0665, 0x0666, 0x0667, //
    0x0668, 0x0669, 0x066a, 0x066b, 0x066c, 0x066d, 0x066e, 0x066f, //
    0x0670, 0xfb50, 0x0672, 0x0673, 0x0674, 0x0675, 0x0676, 0xfbdd, //
    0xfbdd, 0xfb66, 0xfb5e, 0xfb52, 0xfbdd, 0xfbdd, 0xfb56, 0xfb62, //
    0xfb5a, 0xfbdd, 0xfbdd, 0xfb76, 0xfb72, 0xfbdd, 0xfb7a, 0xfb7e, //
    0xfb88, 0x0689, 0x068a, 0x068b, 0xfb84, 0xfb82, 0xfb86, 0x068f, //
    0x0690, 0xfb8c, 0x0692, 0x0693, 0x0694, 0x0695, 0x0696, 0x0697, //
    0xfb8a, 0x0699, 0x069a, 0x069b, 0x069c, 0x069d, 0x069e, 0x069f, //
    0x06a0, 0x06a1, 0x06a2, 0x06a3, 0xfb6a, 0x06a5, 0xfb6e, 0x06a7, //
    0x06a8, 0xfb8e, 0x06aa, 0x06ab, 0x06ac, 0xfbd3, 0x06ae, 0xfb92, //
    0x06b0, 0xfb9a, 0x06b2, 0xfb96, 0x06b4, 0x06b5, 0x06b6, 0x06b7, //
    0x06b8, 0x06b9, 0xfb9e, 0xfba0, 0x06bc, 0x06bd, 0xfbaa, 0x06bf, //
    0xfba4, 0xfba6, 0x06c2, 0x06c3, 0x06c4, 0xfbe0, 0xfbd9, 0xfbd7, //
    0xfbdb, 0xfbe2, 0x06ca, 0xfbde, 0xfbfc, 0x06cd, 0x06ce, 0x06cf, //
    0xfbe4, 0x06d1, 0xfbae, 0xfbb0, 0x06d4, 0x06d5, 0x06d6, 0x06d7, //
    0x06d8, 0x06d9, 0x06da, 0x06db, 0x06dc, 0x06dd, 0x06de, 0x06df, //
    0x06e0, 0x06e1, 0x06e2, 0x06e3, 0x06e4, 0x06e5, 0x06e6, 0x06e7, //
    0x06e8, 0x06e9, 0x06ea, 0x06eb, 0x06ec, 0x06ed, 0x06ee, 0x06ef, //
    0x06f0, 0x06f1, 0x06f2, 0x06f3, 0x06f4, 0x06f5, 0x06f6, 0x06f7, //
    0x06f8, 0x06f9, 0x06fa, 0x06fb, 0x06fc, 0x06fd, 0x06fe, 0x06ff, //
];

/// Looks up a form table, passing presentation forms (and anything else
/// outside U+0600..U+06FF) through unchanged.
pub(super) fn form(table: &[u32; 256], code: u32) -> u32 {
    if (0x0600..=0x06ff).contains(&code) {
        table[(code & 0xff) as usize]
    } else {
        code
    }
}

/// Returns the LAM+ALEF ligature for a shaped LAM followed by the raw
/// codepoint `code`, if the pair forms one. The initial LAM form
/// yields the isolated ligatures, the medial form the final ones.
pub(super) fn lam_alef_ligature(prefix: u32, code: u32) -> Option<u32> {
    match (prefix, code) {
        (0xfedf, 0x0622) => Some(0xfef5),
        (0xfedf, 0x0623) => Some(0xfef7),
        (0xfedf, 0x0625) => Some(0xfef9),
        (0xfedf, 0x0627) => Some(0xfefb),
        (0xfee0, 0x0622) => Some(0xfef6),
        (0xfee0, 0x0623) => Some(0xfef8),
        (0xfee0, 0x0625) => Some(0xfefa),
        (0xfee0, 0x0627) => Some(0xfefc),
        _ => None,
    }
}
