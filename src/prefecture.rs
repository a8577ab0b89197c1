/// A prefecture accepted as chat input.
///
/// `name` is what users type, `api_name` is the `name_ja` used by the
/// statistics API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prefecture {
    pub name: &'static str,
    pub api_name: &'static str,
}

const fn pref(name: &'static str, api_name: &'static str) -> Prefecture {
    Prefecture { name, api_name }
}

/// All 47 prefectures, in JIS code order.
pub const PREFECTURES: [Prefecture; 47] = [
    pref("北海道", "北海道"),
    pref("青森県", "青森"),
    pref("岩手県", "岩手"),
    pref("宮城県", "宮城"),
    pref("秋田県", "秋田"),
    pref("山形県", "山形"),
    pref("福島県", "福島"),
    pref("茨城県", "茨城"),
    pref("栃木県", "栃木"),
    pref("群馬県", "群馬"),
    pref("埼玉県", "埼玉"),
    pref("千葉県", "千葉"),
    pref("東京都", "東京"),
    pref("神奈川県", "神奈川"),
    pref("新潟県", "新潟"),
    pref("富山県", "富山"),
    pref("石川県", "石川"),
    pref("福井県", "福井"),
    pref("山梨県", "山梨"),
    pref("長野県", "長野"),
    pref("岐阜県", "岐阜"),
    pref("静岡県", "静岡"),
    pref("愛知県", "愛知"),
    pref("三重県", "三重"),
    pref("滋賀県", "滋賀"),
    pref("京都府", "京都"),
    pref("大阪府", "大阪"),
    pref("兵庫県", "兵庫"),
    pref("奈良県", "奈良"),
    pref("和歌山県", "和歌山"),
    pref("鳥取県", "鳥取"),
    pref("島根県", "島根"),
    pref("岡山県", "岡山"),
    pref("広島県", "広島"),
    pref("山口県", "山口"),
    pref("徳島県", "徳島"),
    pref("香川県", "香川"),
    pref("愛媛県", "愛媛"),
    pref("高知県", "高知"),
    pref("福岡県", "福岡"),
    pref("佐賀県", "佐賀"),
    pref("長崎県", "長崎"),
    pref("熊本県", "熊本"),
    pref("大分県", "大分"),
    pref("宮崎県", "宮崎"),
    pref("鹿児島県", "鹿児島"),
    pref("沖縄県", "沖縄"),
];

/// Look up a prefecture by the text a user sent. Surrounding whitespace is
/// ignored, everything else must match exactly.
pub fn lookup(input: &str) -> Option<&'static Prefecture> {
    let input = input.trim();
    PREFECTURES.iter().find(|p| p.name == input)
}
