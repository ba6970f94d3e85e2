//! Shared fixture for integration tests.
#![allow(dead_code)]

/// Key the fixture ciphertext was produced with.
pub const FIXTURE_KEY: i64 = 13;

/// Opening of a novel, used as a realistic Russian plaintext.
pub const PLAINTEXT: &str = concat!(
    "В самом начале своего жизнеописания я должен упомянуть о том",
    ", что родился я в пятницу, в полночь. Замечено было, что мой",
    " первый крик раздался, когда начали бить часы. Принимая во в",
    "нимание день и час моего появления на свет, сиделка и нескол",
    "ько мудрых соседок, живо интересовавшихся моей особой еще за",
    " много месяцев до возможного личного знакомства со мной, объ",
    "явили, что мне суждено быть несчастным в жизни.",
);

/// `PLAINTEXT` encrypted with `FIXTURE_KEY`.
pub const CIPHERTEXT: &str = concat!(
    r#"ОЛюмщыщЛъм-мшсЛюоыспыЛухфъсыьхюмъхГЛГЛрышусъЛ:ьыщГъ:яАЛыЛяыщ"#,
    r#"ЕЛ-яыЛэырхшюГЛГЛоЛьГяъх?:ЕЛоЛьышъы-АЙЛФмщс-съыЛн шыЕЛ-яыЛщыц"#,
    r#"Льсэо цЛчэхчЛэмфрмшюГЕЛчыпрмЛъм-мшхЛнхяАЛ-мю ЙЛЬэхъхщмГЛоыЛо"#,
    r#"ъхщмъхсЛрсъАЛхЛ-мюЛщыспыЛьыГошсъхГЛъмЛюосяЕЛюхрсшчмЛхЛъсючыш"#,
    r#"АчыЛщ:рэ "ЛюыюсрычЕЛухоыЛхъясэсюыомо—х"юГЛщысцЛыюыныцЛс.сЛфм"#,
    r#"ЛщъыпыЛщсюГ?соЛрыЛоыфщыуъыпыЛшх-ъыпыЛфъмчыщюяомЛюыЛщъыцЕЛын!"#,
    r#"ГохшхЕЛ-яыЛщъсЛю:урсъыЛн яАЛъсю-мюяъ щЛоЛухфъхЙ"#,
);
