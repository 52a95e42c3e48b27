use crate::models::Location;

type SeedRow = (i64, &'static str, &'static str, &'static str, &'static str, f64, f64);

/// Eid and Jummah grounds across the FCT, used when no stored list exists.
const SEED: &[SeedRow] = &[
    (1, "NATIONAL EID GROUND", "National Eid ground, Along Airport Road, After City Gate.", "09:00am", "01:30pm", 9.0765, 7.3986),
    (2, "AN-NOOR", "Al- Noor Masjid. Wuse 2 Abuja.", "08:00am", "01:30pm", 9.0784, 7.4753),
    (3, "APO LEGISLATIVE", "Central Mosque, APO Legislative Quarters, Zone E.", "08:30am", "01:30pm", 9.0292, 7.4893),
    (4, "JIBWIS HEADQUARTERS", "Utako Berger, Abuja", "08:30am", "01:30pm", 9.0741, 7.4452),
    (5, "GWARIMPA", "Gwarimpa Eid Ground", "08:30am", "01:30pm", 9.1167, 7.4167),
    (6, "NURUL YAQEEN", "Nurul Yaqeen Mosque, Plot 268, Kafe, Life Camp, Opp. Godab Estate.", "09:00am", "01:30pm", 9.0941, 7.4059),
    (7, "DUTSE BAUMPA", "By Shafa Energy, Tipper Garage Bmuko Junction, along Dutse - Bwari Road.", "09:00am", "01:30pm", 9.1528, 7.3444),
    (8, "ANSAR-UD-DEEN", "Ansar-ud-deen Mosque No 80 Aguiyi Ironsi Street Wuse 2.", "08:30am", "01:30pm", 9.0784, 7.4753),
    (9, "IMF MASJID", "No 4 Ibrahim Maimunat Foundation (IMF) Close, FO1 Kubwa, FCT, Abuja.", "09:00am", "01:30pm", 9.1667, 7.3333),
    (10, "Al-HABIBIYYAH MOSQUE", "Al-habibiyyah Mosque, Plot 753, Babagana Kingibe Street Guzape, Abuja.", "09:00am", "01:30pm", 9.0437, 7.5048),
    (11, "BANEX PLAZA", "Uthman Bin Affan Mosque, (Banex Plaza), Wuse 2.", "08:00am", "01:30pm", 9.0784, 7.4753),
    (12, "CITEC EID GROUND", "Citec Estate, along Idu-Junction, Mbora Distric, Abuja.", "08:30am", "01:30pm", 9.0765, 7.3986),
    (13, "Al-HUDA MASJID", "Al-Huda Masjid Premises, Uwadia Resorts of Millionaires Quarters, Byazhin-Kubwa.", "09:00am", "01:30pm", 9.1667, 7.3333),
    (14, "AL-IKHLAS MASJID", "FCDA Owner Occupier Estate, Kubwa, Abuja.", "09:00am", "01:30pm", 9.1667, 7.3333),
    (15, "OLD BERGER", "Old Berger Yard, Airport Road, Lugbe, Abuja", "08:15am", "01:30pm", 9.0765, 7.3986),
    (16, "AIRPORT MASJID", "Praying Ground, AREA B, Airport Masjid.", "08:30am", "01:30pm", 9.0765, 7.3986),
    (17, "MASJID ABUBAKAR SIDDIQUE", "Masjid Abubakar Siddique, Wuse Zone 6, Abuja.", "08:45am", "01:30pm", 9.0784, 7.4753),
    (18, "JEDO ESTATE", "Jumma'ah Masjid, Jedo Estate, Along Airport Road Abuja.", "08:00am", "01:30pm", 9.0765, 7.3986),
    (19, "ZUMA BARRACKS", "Ibn Abbas Masjid, Besides Zuma Barracks, Along Abuja-Kaduna Expressway, Suleja.", "08:00am", "01:30pm", 9.1833, 7.1833),
    (20, "FOMWAN", "Fomwan Headquarters Central Mosque, Utako", "08:45am", "01:30pm", 9.0741, 7.4452),
    (21, "MUSLIM COMMUNITY KUBWA", "Muslim Community Central Mosque, Shelter Farm Kubwa.", "09:00am", "01:30pm", 9.1667, 7.3333),
    (22, "DAMBATTA MASJID", "Dambatta masjid, No23 Kaltungo street Garki II.", "08:00am", "01:30pm", 9.0333, 7.4833),
    (23, "AMSSCO ESTATE", "Anas Ibn Malik Islamic Centre, AMSSCO Estate, Galadimawa, Abuja.", "08:00am", "01:30pm", 9.0765, 7.3986),
    (24, "KUBWA MUSLIM COMMUNITY", "Kubwa Muslim Community Eid Ground, Phase 3 Junction, Kubwa.", "08:30am", "01:30pm", 9.1667, 7.3333),
    (25, "JIBWIS ISLAMIC CENTER", "Adamu Alieru Crescent, Guzape, Abuja.", "08:00am", "01:30pm", 9.0437, 7.5048),
    (26, "JIBWIS FCT", "DAWAKI Extension, News Engineering", "08:00am", "01:30pm", 9.1167, 7.4167),
    (27, "CHIKA JUMA'AT MOSQUE", "Chika juma'at Mosque Muslims Initiative, Along Airport Road, Abuja.", "09:00am", "01:30pm", 9.0765, 7.3986),
    (28, "AREA 8 MASJID", "Area 8 Masjid section 1, Sheda Close Garki Abuja.", "08:30am", "01:30pm", 9.0333, 7.4833),
    (29, "SUNNYVALE HOMES MASJID", "Sunnyvale Homes Sports Complex (near old gate), Dakwo District, Abuja.", "09:00am", "01:30pm", 9.0765, 7.3986),
    (30, "MAMBILLA BARRACKS", "Guards Brigade Garrison Parade Ground, Mambilla Barracks, Asokoro.", "08:30am", "01:30pm", 9.0437, 7.5048),
    (31, "ABACHA BARRACKS", "Mugadishu Cantonment, Abacha Barracks (Parade ground).", "08:30am", "01:30pm", 9.0765, 7.3986),
    (32, "OTM MASJID", "OTM Masjid, Promenade/Kwankwaso Estate Lokogoma, Cluster 5", "08:30am", "01:30pm", 9.0765, 7.3986),
    (33, "NATIONAL ASSEMBLY", "National Assembly Central Mosque", "08:30am", "01:30pm", 9.0579, 7.4951),
    (34, "WUYE CENTRAL MASJID", "Wuye Central Masjid, Wuye District, FCT Abuja", "08:30am", "01:30pm", 9.0765, 7.3986),
    (35, "JIBWIS GBAZANGO KUBWA", "JIBWIS Prayer Ground @ NYSC Junction by the Express, Gbazango, Kubwa, Abuja", "08:30am", "01:30pm", 9.1667, 7.3333),
    (36, "PEGI MUSLIM COMMUNITY", "Pegi Muslim Community, Pegi Kuje. Eid Praying Ground.", "08:30am", "01:30pm", 9.0765, 7.3986),
    (37, "CYCLIC ENERGY LTD", "Cyclic Airport Road", "08:30am", "01:30pm", 9.0765, 7.3986),
    (38, "ESTEEM BOYS' COLLEGE", "Esteem Boys' College, Lokogoma", "08:30am", "01:30pm", 9.0765, 7.3986),
    (39, "ANSAR-DEEN", "Ansar-Deen Gwarimpa Mosque", "08:30am", "01:30pm", 9.1167, 7.4167),
    (40, "GWARIMPA MSS MASJID", "Abdullateef Adegbite Jumua Masjid (MSS), 1st Avenue, Gwarimpa", "08:30am", "01:30pm", 9.1167, 7.4167),
    (41, "KUDURU MUSLIM COMMUNITY", "KMC, Kuduru Muslim Community at GSS Kuduru Premises, Bwari - Abuja.", "08:30am", "01:30pm", 9.2833, 7.3833),
    (42, "ANOOR ISLAMIC CENTRE MASJID", "Anoor Islamic Centre Masjid/Crescent Pearls Leadership Academy CPLA, Plot 107, Cadastral C20. Behind Nizamiye Turkish Hospital Mbora District, Abuja.", "08:30am", "01:30pm", 9.0765, 7.3986),
    (43, "FEDERAL HOUSING AUTHORITY MOSQUE", "Federal housing authority Mosque Asokoro, Abuja.", "08:30am", "01:30pm", 9.0437, 7.5048),
    (44, "ANSAR-UD-DEEN KUBWA", "Ansar-ud-Deen Central Mosque, at Off Arab Road by Mango tree, Kubwa Abuja.", "08:30am", "01:30pm", 9.1667, 7.3333),
    (45, "SUNCITY ESTATE", "Suncity Estate Juma'at Masjeed", "08:30am", "01:30pm", 9.0765, 7.3986),
    (46, "MAITAMA CENTRAL MOSQUE", "Maitama Central Mosque. No 120 Nile Street.", "08:30am", "01:30pm", 9.0824, 7.4959),
    (47, "NASFAT ISLAMIC CENTRE", "NASFAT Islamic Centre, plot 313 Augustus Alkhomu Way, UTAKO District, Abuja", "08:30am", "01:30pm", 9.0741, 7.4452),
    (48, "KUBWA", "FO1 Eid Ground, Kubwa", "08:30am", "01:30pm", 9.1667, 7.3333),
    (49, "AYA CENTRAL MOSQUE", "A Y A Asokoro Central mosque", "08:30am", "01:30pm", 9.0437, 7.5048),
    (50, "BMUKO MUSLIM COMMUNITY", "Bmuko Muslim Community, Off Tipper Garage, Dutse, off Bwari Expressway, Abuja.", "08:30am", "01:30pm", 9.1528, 7.3444),
    (51, "SHEHU SHAGARI CENTRAL MOSQUE", "Mosque premises, Section 2, Area 1, Garki Abuja.", "08:30am", "01:30pm", 9.0333, 7.4833),
    (52, "ANWARU -L-HUDA", "Anwaru -L-Huda League of Nigeria (AHLON), Area 1, Section 1, Garki, Abuja.", "08:30am", "01:30pm", 9.0333, 7.4833),
    (53, "SUNUSI DANTATA", "Sunusi Dantata Juma'at Mosque Central Area", "08:30am", "01:30pm", 9.0579, 7.4951),
];

pub fn seed_locations() -> Vec<Location> {
    SEED.iter()
        .map(|&(id, name, address, eid_time, jummah_time, lat, lng)| Location {
            id,
            name: name.to_string(),
            address: address.to_string(),
            eid_time: eid_time.to_string(),
            jummah_time: jummah_time.to_string(),
            lat,
            lng,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_unique() {
        let seed = seed_locations();
        let ids: HashSet<i64> = seed.iter().map(|l| l.id).collect();
        assert_eq!(ids.len(), seed.len());
        assert_eq!(seed.len(), 53);
    }
}
