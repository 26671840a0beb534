use super::*;

#[test]
fn table_matches_reference_entries() {
    assert_eq!(CRC_TABLE[0], 0);
    assert_eq!(CRC_TABLE[1], 0x7707_3096);
    assert_eq!(CRC_TABLE[128], 0xEDB8_8320);
    assert_eq!(CRC_TABLE[255], 0x2D02_EF8D);
}

#[test]
fn known_vectors() {
    assert_eq!(checksum(b""), 0);
    assert_eq!(checksum(b"123456789"), 0xCBF4_3926);
    assert_eq!(checksum(b"a"), 0xE8B7_BE43);
    assert_eq!(
        checksum_str("The quick brown fox jumps over the lazy dog"),
        0x414F_A339
    );
}

#[test]
fn agrees_with_crc32fast() {
    let samples = [
        "melvorD:CoolRock",
        "melvorF:Pyro",
        "melvorTotH:Snek",
        "namespace:Ünïcödé",
        "",
    ];
    for sample in samples {
        assert_eq!(
            checksum_str(sample),
            crc32fast::hash(sample.as_bytes()),
            "mismatch for {sample:?}"
        );
    }

    let every_byte: Vec<u8> = (0..=255u8).collect();
    assert_eq!(checksum(&every_byte), crc32fast::hash(&every_byte));
}
