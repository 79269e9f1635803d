//! Offline responder: canned answers when no language model is reachable.
//!
//! Keyword matching is plain substring membership on the lower-cased
//! question, tried in a fixed order. The first topic that matches wins,
//! so "ph" beats everything else ("berapa pH air yang aman?" is a pH
//! question, not a safety one).

/// What a question is about, as far as the offline responder can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Ph,
    Stations,
    SafeToDrink,
    Tds,
    Conductivity,
    General,
}

/// Ordered keyword table. Earlier rows take precedence.
const KEYWORDS: &[(Topic, &[&str])] = &[
    (Topic::Ph, &["ph"]),
    (Topic::Stations, &["lokasi", "stasiun", "pemantauan"]),
    (Topic::SafeToDrink, &["aman", "minum"]),
    (Topic::Tds, &["tds"]),
    (Topic::Conductivity, &["ec", "konduktivitas"]),
];

impl Topic {
    /// The fixed answer for this topic.
    pub fn answer(self) -> &'static str {
        match self {
            Self::Ph => PH_ANSWER,
            Self::Stations => STATIONS_ANSWER,
            Self::SafeToDrink => SAFE_TO_DRINK_ANSWER,
            Self::Tds => TDS_ANSWER,
            Self::Conductivity => EC_ANSWER,
            Self::General => GENERAL_ANSWER,
        }
    }
}

/// Classify a question by keyword.
pub fn topic(message: &str) -> Topic {
    let lower = message.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::General)
}

/// Answer a question without touching the network.
pub fn respond(message: &str) -> &'static str {
    topic(message).answer()
}

const PH_ANSWER: &str = "pH adalah ukuran tingkat keasaman atau kebasaan air, dengan skala 0-14. Untuk air minum:\n\n✅ pH Normal: 6.5 - 8.5\n⚠️ pH < 6.5: Terlalu asam (korosif)\n⚠️ pH > 8.5: Terlalu basa\n\nAir dengan pH normal aman untuk diminum dan tidak merusak pipa.\n\n💡 Tips: Air sumur di Jatinangor umumnya memiliki pH yang baik untuk konsumsi.\n\n---\n⚠️ Mode Demo: Untuk AI response penuh, jalankan: cileles serve";

const STATIONS_ANSWER: &str = "16 Stasiun Pemantauan Air di Cileles, Jatinangor:\n\n📍 TA01 - TA16: Tersebar di berbagai titik strategis\n\nStasiun-stasiun ini dipasang untuk:\n• Memantau kualitas air secara real-time\n• Mendeteksi perubahan parameter kualitas air\n• Memberikan data untuk analisis tren\n\nAnda dapat melihat daftar lengkapnya dengan: cileles stations --map\n\n---\n⚠️ Mode Demo: Untuk AI response penuh, jalankan: cileles serve";

const SAFE_TO_DRINK_ANSWER: &str = "Air dinyatakan aman untuk diminum jika memenuhi standar:\n\n✅ pH: 6.5 - 8.5\n✅ TDS: < 500 mg/L (sangat baik)\n⚠️ TDS: 500-1000 mg/L (cukup baik, perlu perhatian)\n❌ TDS: > 1000 mg/L (tidak disarankan)\n\nRekomendasi:\n• Periksa data tabel untuk melihat kondisi stasiun terdekat\n• Air dengan status \"Baik\" (hijau) aman diminum\n• Air dengan status \"Perlu Perhatian\" (kuning) sebaiknya dimasak dulu\n• Air dengan status \"Buruk\" (merah) tidak disarankan\n\n---\n⚠️ Mode Demo: Untuk AI response penuh, jalankan: cileles serve";

const TDS_ANSWER: &str = "TDS (Total Dissolved Solids) adalah ukuran total padatan terlarut dalam air, dalam satuan mg/L atau ppm.\n\n📊 Standar TDS Air Minum:\n✅ 0-300 mg/L: Sangat baik\n✅ 300-500 mg/L: Baik\n⚠️ 500-1000 mg/L: Cukup baik\n❌ > 1000 mg/L: Tidak disarankan\n\nTDS tinggi dapat menandakan:\n• Banyaknya mineral terlarut\n• Kontaminasi garam atau mineral lain\n• Perlu treatment sebelum konsumsi\n\n---\n⚠️ Mode Demo: Untuk AI response penuh, jalankan: cileles serve";

const EC_ANSWER: &str = "EC (Electrical Conductivity) atau Konduktivitas Listrik mengukur kemampuan air menghantarkan listrik, dalam satuan μS/cm.\n\n🔬 Apa artinya?\nEC tinggi = banyak ion terlarut dalam air\nEC rendah = sedikit ion terlarut\n\n📈 Hubungan EC dengan TDS:\nEC ≈ TDS/2 (dalam ppm)\n\nEC dapat mendeteksi:\n• Kontaminasi mineral\n• Pencemaran industri\n• Intrusi air laut\n• Perubahan kualitas air\n\n---\n⚠️ Mode Demo: Untuk AI response penuh, jalankan: cileles serve";

const GENERAL_ANSWER: &str = "🤖 Saya siap membantu Anda memahami kualitas air di Cileles, Jatinangor!\n\nBeberapa topik yang bisa saya bantu:\n• Parameter kualitas air (pH, TDS, EC)\n• Standar air minum yang aman\n• Interpretasi data monitoring\n• Lokasi stasiun pemantauan\n• Tips menjaga kualitas air\n\nSilakan tanyakan pertanyaan spesifik tentang kualitas air!\n\n---\n⚠️ Mode Demo: Untuk mengaktifkan AI OpenAI penuh:\n1. Set OPENAI_API_KEY\n2. Jalankan: cileles serve\n3. Tanya lagi: cileles chat";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ph_matches_in_any_case() {
        assert_eq!(topic("Berapa pH normal?"), Topic::Ph);
        assert_eq!(topic("PH AIR"), Topic::Ph);
        assert!(respond("ph").contains("6.5 - 8.5"));
    }

    #[test]
    fn ph_wins_over_later_topics() {
        // Contains both "ph" and "aman".
        assert_eq!(topic("pH berapa yang aman?"), Topic::Ph);
        // Contains both "stasiun" and "tds".
        assert_eq!(topic("stasiun dengan TDS tertinggi"), Topic::Stations);
    }

    #[test]
    fn each_topic_is_reachable() {
        assert_eq!(topic("di mana lokasi alatnya?"), Topic::Stations);
        assert_eq!(topic("apakah boleh diminum?"), Topic::SafeToDrink);
        assert_eq!(topic("apa itu tds"), Topic::Tds);
        assert_eq!(topic("konduktivitas itu apa"), Topic::Conductivity);
        assert_eq!(topic("halo"), Topic::General);
    }

    #[test]
    fn substring_matching_is_literal() {
        // "sekecil" contains "ec".
        assert_eq!(topic("sekecil apa?"), Topic::Conductivity);
    }

    #[test]
    fn unmatched_input_lists_topics() {
        let answer = respond("selamat pagi");
        assert!(answer.contains("Beberapa topik"));
        assert!(answer.contains("Mode Demo"));
        assert_eq!(respond(""), answer);
    }

    #[test]
    fn answers_are_deterministic() {
        let question = "Apakah air di TA05 aman diminum?";
        assert_eq!(respond(question), respond(question));
        assert!(std::ptr::eq(respond(question), respond(question)));
    }

    #[test]
    fn every_answer_carries_the_demo_notice() {
        for t in [
            Topic::Ph,
            Topic::Stations,
            Topic::SafeToDrink,
            Topic::Tds,
            Topic::Conductivity,
            Topic::General,
        ] {
            assert!(t.answer().contains("---\n⚠️ Mode Demo"), "{t:?}");
        }
    }

    #[test]
    fn answers_quote_domain_numbers() {
        assert!(Topic::SafeToDrink.answer().contains("< 500 mg/L"));
        assert!(Topic::Tds.answer().contains("> 1000 mg/L"));
        assert!(Topic::Conductivity.answer().contains("μS/cm"));
        assert!(Topic::Stations.answer().contains("TA01 - TA16"));
    }
}
